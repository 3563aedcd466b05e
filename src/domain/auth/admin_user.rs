use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::domain_traits::{ContentKind, create_content},
    store::{Collection, Filter, StoreClient, StoreError, StoreResult},
    util::crypto::hash_pw::hash_pw,
};

/// Login account for the admin area. Never returned by any endpoint as-is.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl ContentKind for AdminUser {
    const COLLECTION: Collection = Collection::AdminUsers;
}

#[derive(Serialize)]
struct AdminUserDraft<'a> {
    email: &'a str,
    name: &'a str,
    password_hash: &'a str,
}

/// Emails are stored and looked up lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn find_admin_by_email(
    store: &StoreClient,
    email: &str,
) -> StoreResult<Option<AdminUser>> {
    let email = normalize_email(email);
    store
        .find_one(Collection::AdminUsers, &[Filter::eq("email", email)])
        .await?
        .map(AdminUser::from_record)
        .transpose()
}

pub async fn create_admin(
    store: &StoreClient,
    email: &str,
    name: &str,
    password: String,
) -> anyhow::Result<AdminUser> {
    let password_hash = hash_pw(password).await?;
    let email = normalize_email(email);
    let admin = create_content::<AdminUser, _>(
        store,
        &AdminUserDraft {
            email: &email,
            name,
            password_hash: &password_hash,
        },
    )
    .await?;
    Ok(admin)
}

/// Creates the first admin account unless one with that email exists.
/// Returns whether an account was created.
pub async fn bootstrap_admin(
    store: &StoreClient,
    email: &str,
    password: String,
) -> anyhow::Result<bool> {
    if find_admin_by_email(store, email).await?.is_some() {
        return Ok(false);
    }

    match create_admin(store, email, "Administrator", password).await {
        Ok(admin) => {
            info!(admin_id = %admin.id, email = %admin.email, "Bootstrapped admin account");
            Ok(true)
        }
        // Another instance created it between our lookup and insert.
        Err(e) if matches!(e.downcast_ref::<StoreError>(), Some(StoreError::Conflict(_))) => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{client::DEFAULT_STORE_TIMEOUT, memory::MemoryStore};
    use crate::util::crypto::verify_pw::verify_pw;

    #[tokio::test]
    async fn bootstrap_creates_once_and_stores_a_hash() {
        let store = StoreClient::new(Arc::new(MemoryStore::new()), DEFAULT_STORE_TIMEOUT);

        let created = bootstrap_admin(&store, "Admin@LumenGaze.test", "s3cret!".into()).await;
        assert!(created.unwrap());
        let again = bootstrap_admin(&store, "admin@lumengaze.test", "other".into()).await;
        assert!(!again.unwrap());

        let admin = find_admin_by_email(&store, " ADMIN@lumengaze.test ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.email, "admin@lumengaze.test");
        assert_ne!(admin.password_hash, "s3cret!");
        assert!(verify_pw("s3cret!", &admin.password_hash).await.unwrap());
    }
}
