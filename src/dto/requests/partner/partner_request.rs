use serde_derive::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::partner::PartnerDraft,
    errors::code_error::CodeErrorResp,
    util::validation::fields::{optional_text, optional_url, require_text},
};

#[derive(Deserialize, ToSchema)]
pub struct PartnerRequest {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl PartnerRequest {
    pub fn into_draft(self) -> Result<PartnerDraft, CodeErrorResp> {
        Ok(PartnerDraft {
            name: require_text("name", &self.name)?,
            website: optional_url("website", self.website.as_deref())?,
            description: optional_text(self.description.as_deref()),
            logo_url: optional_url("logo_url", self.logo_url.as_deref())?,
        })
    }
}

#[derive(Deserialize, IntoParams)]
pub struct GetPartnersQuery {
    pub limit: Option<usize>,
}
