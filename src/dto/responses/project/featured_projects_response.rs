use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::project::Project;

#[derive(Serialize, ToSchema)]
pub struct FeaturedProjectsResponse {
    pub projects: Vec<Project>,
    /// Distinct categories across all projects, for the home page filter chips.
    pub categories: Vec<String>,
}
