use serde_derive::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
pub struct GetPostsQuery {
    /// Matched against title and excerpt, case-insensitively.
    pub q: Option<String>,
}
