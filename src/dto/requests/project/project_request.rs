use serde_derive::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::project::{ProjectDraft, RealityType},
    errors::code_error::CodeErrorResp,
    util::validation::fields::{optional_url, require_text, require_url},
};

#[derive(Deserialize, ToSchema)]
pub struct ProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub reality_type: RealityType,
    /// Replaces the project's screenshots when present; `[]` clears them.
    #[serde(default)]
    pub screenshots: Option<Vec<String>>,
}

impl ProjectRequest {
    /// Splits the request into the project fields and the optional screenshot list.
    pub fn into_parts(self) -> Result<(ProjectDraft, Option<Vec<String>>), CodeErrorResp> {
        let screenshots = self
            .screenshots
            .map(|urls| {
                urls.iter()
                    .filter(|url| !url.trim().is_empty())
                    .map(|url| require_url("screenshots", url))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let draft = ProjectDraft {
            title: require_text("title", &self.title)?,
            description: self.description.trim().to_owned(),
            category: require_text("category", &self.category)?,
            featured: self.featured,
            thumbnail_url: optional_url("thumbnail_url", self.thumbnail_url.as_deref())?,
            video_link: optional_url("video_link", self.video_link.as_deref())?,
            download_link: optional_url("download_link", self.download_link.as_deref())?,
            reality_type: self.reality_type,
        };

        Ok((draft, screenshots))
    }
}

#[derive(Deserialize, IntoParams)]
pub struct GetProjectsQuery {
    /// Matched against title and description, case-insensitively.
    pub q: Option<String>,
    /// `All` or absent disables the filter.
    pub category: Option<String>,
    /// `AR`, `VR`, `MR` or `All`.
    pub reality_type: Option<String>,
}
