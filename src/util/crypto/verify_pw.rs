use anyhow::Result;
use argon2::{Argon2, PasswordVerifier, password_hash::PasswordHash};

/// `Ok(false)` for a wrong password, `Err` only when the stored hash is unusable.
pub async fn verify_pw(password: &str, expected_hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let expected_hash = expected_hash.to_owned();
    tokio::task::spawn_blocking(move || {
        let argon2 = Argon2::default();
        let parsed_hash =
            PasswordHash::new(&expected_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow::anyhow!(e.to_string())),
        }
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::crypto::hash_pw::hash_pw;

    #[tokio::test]
    async fn hashed_password_verifies_and_wrong_one_does_not() {
        let hash = hash_pw("correct horse".to_owned()).await.unwrap();

        assert!(verify_pw("correct horse", &hash).await.unwrap());
        assert!(!verify_pw("battery staple", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_an_error() {
        assert!(verify_pw("pw", "not-a-phc-string").await.is_err());
    }
}
