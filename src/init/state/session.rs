use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_SESSION_DURATION: chrono::Duration = chrono::Duration::hours(8);

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub admin_id: Uuid,
    pub admin_email: String,
    pub admin_name: String,
    pub created_at: chrono::DateTime<Utc>,
    pub expires_at: chrono::DateTime<Utc>,
}

impl Session {
    pub fn is_valid(&self) -> bool {
        let now = Utc::now();

        self.created_at <= now && self.expires_at > now
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            admin_id: self.admin_id,
            email: self.admin_email.clone(),
            name: self.admin_name.clone(),
        }
    }
}

/// The signed-in admin, put into request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize, utoipa::ToSchema)]
pub struct CurrentUser {
    pub admin_id: Uuid,
    pub email: String,
    pub name: String,
}
