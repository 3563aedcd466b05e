use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{
    domain::career::{CareerDraft, DEFAULT_EMPLOYMENT_TYPE},
    errors::code_error::CodeErrorResp,
    util::validation::fields::{optional_text, require_text},
};

#[derive(Deserialize, ToSchema)]
pub struct CareerRequest {
    pub title: String,
    pub department: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
}

impl CareerRequest {
    pub fn into_draft(self) -> Result<CareerDraft, CodeErrorResp> {
        Ok(CareerDraft {
            title: require_text("title", &self.title)?,
            department: require_text("department", &self.department)?,
            location: require_text("location", &self.location)?,
            description: require_text("description", &self.description)?,
            requirements: require_text("requirements", &self.requirements)?,
            salary_range: optional_text(self.salary_range.as_deref()),
            employment_type: optional_text(self.employment_type.as_deref())
                .unwrap_or_else(|| DEFAULT_EMPLOYMENT_TYPE.to_owned()),
        })
    }
}
