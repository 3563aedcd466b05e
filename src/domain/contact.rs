use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::Collection;

use super::domain_traits::ContentKind;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContentKind for ContactSubmission {
    const COLLECTION: Collection = Collection::ContactSubmissions;
}

#[derive(Clone, Debug, Serialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}
