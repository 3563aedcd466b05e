use utoipa::ToSchema;

use crate::init::state::CurrentUser;

#[derive(serde_derive::Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub admin: CurrentUser,
}
