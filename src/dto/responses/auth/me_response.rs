use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::init::state::CurrentUser;

#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub admin: CurrentUser,
    pub session_expires_at: chrono::DateTime<chrono::Utc>,
}
