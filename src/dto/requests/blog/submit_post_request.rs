use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{
    domain::blog::blog::BlogPostDraft,
    errors::code_error::CodeErrorResp,
    util::validation::fields::{optional_text, optional_url, require_text},
};

/// Body of a post create or edit. There is no slug field; the slug always
/// follows the title.
#[derive(Deserialize, ToSchema)]
pub struct SubmitPostRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl SubmitPostRequest {
    pub fn into_draft(self) -> Result<BlogPostDraft, CodeErrorResp> {
        Ok(BlogPostDraft {
            title: require_text("title", &self.title)?,
            excerpt: optional_text(self.excerpt.as_deref()),
            content: require_text("content", &self.content)?,
            image_url: optional_url("image_url", self.image_url.as_deref())?,
            published: self.published,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> SubmitPostRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "content": "<p>Body</p>",
            "excerpt": "  ",
            "image_url": "https://cdn.test/cover.png",
        }))
        .unwrap()
    }

    #[test]
    fn valid_request_becomes_a_trimmed_draft() {
        let draft = request("  Launch Day ").into_draft().unwrap();
        assert_eq!(draft.title, "Launch Day");
        assert_eq!(draft.excerpt, None);
        assert!(!draft.published);
    }

    #[test]
    fn a_slug_in_the_body_is_ignored() {
        let req: SubmitPostRequest = serde_json::from_value(serde_json::json!({
            "title": "Demo",
            "content": "x",
            "slug": "hand-picked",
        }))
        .unwrap();
        assert_eq!(req.into_draft().unwrap().title, "Demo");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(request(" ").into_draft().is_err());
    }
}
