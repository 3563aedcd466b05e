use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{
    domain::event::EventDraft,
    errors::code_error::CodeErrorResp,
    util::validation::fields::{normalize_timestamp, optional_text, optional_url, require_text},
};

#[derive(Deserialize, ToSchema)]
pub struct EventRequest {
    pub title: String,
    /// RFC 3339, any offset.
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl EventRequest {
    pub fn into_draft(self) -> Result<EventDraft, CodeErrorResp> {
        Ok(EventDraft {
            title: require_text("title", &self.title)?,
            date: normalize_timestamp("date", &self.date)?,
            location: optional_text(self.location.as_deref()),
            description: optional_text(self.description.as_deref()),
            image_url: optional_url("image_url", self.image_url.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_normalized_to_utc() {
        let req: EventRequest = serde_json::from_value(serde_json::json!({
            "title": "XR Meetup",
            "date": "2026-11-02T19:30:00+09:00",
        }))
        .unwrap();
        assert_eq!(req.into_draft().unwrap().date, "2026-11-02T10:30:00Z");
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let req: EventRequest = serde_json::from_value(serde_json::json!({
            "title": "XR Meetup",
            "date": "next tuesday",
        }))
        .unwrap();
        assert!(req.into_draft().is_err());
    }
}
