use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::Collection;

use super::domain_traits::ContentKind;

pub const DEFAULT_EMPLOYMENT_TYPE: &str = "Full-time";

fn default_employment_type() -> String {
    DEFAULT_EMPLOYMENT_TYPE.to_owned()
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Career {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentKind for Career {
    const COLLECTION: Collection = Collection::Careers;
}

#[derive(Clone, Debug, Serialize)]
pub struct CareerDraft {
    pub title: String,
    pub department: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: Option<String>,
    pub employment_type: String,
}
