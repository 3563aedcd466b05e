use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{
    domain::contact::ContactDraft,
    errors::code_error::CodeErrorResp,
    util::validation::fields::{require_email, require_text},
};

#[derive(Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    pub fn into_draft(self) -> Result<ContactDraft, CodeErrorResp> {
        Ok(ContactDraft {
            name: require_text("name", &self.name)?,
            email: require_email(&self.email)?,
            message: require_text("message", &self.message)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_be_valid() {
        let req = ContactRequest {
            name: "Min".to_owned(),
            email: "not-an-email".to_owned(),
            message: "Hi".to_owned(),
        };
        assert_eq!(req.into_draft().unwrap_err().error_code, 12);
    }
}
