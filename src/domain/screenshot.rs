use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

/// What may be stored or sent for a screenshot: a bare URL or `{url, alt}`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ScreenshotEncoding {
    Url(String),
    Structured {
        url: String,
        #[serde(default)]
        alt: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Screenshot {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Screenshot {
    /// `None` when the URL is blank. A blank alt becomes no alt.
    pub fn new(url: &str, alt: Option<&str>) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        Some(Screenshot {
            url: url.to_owned(),
            alt: alt
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_owned),
        })
    }
}

impl ScreenshotEncoding {
    pub fn normalize(self) -> Option<Screenshot> {
        match self {
            ScreenshotEncoding::Url(url) => Screenshot::new(&url, None),
            ScreenshotEncoding::Structured { url, alt } => Screenshot::new(&url, alt.as_deref()),
        }
    }
}

/// Normalizes a mixed sequence, dropping entries without a URL. Order is kept.
pub fn normalize_screenshots(raw: Vec<ScreenshotEncoding>) -> Vec<Screenshot> {
    raw.into_iter()
        .filter_map(ScreenshotEncoding::normalize)
        .collect()
}

/// Field deserializer for stored sequences. Null, absent or a non-array value
/// reads as empty; entries matching neither encoding are skipped.
pub fn deserialize_screenshots<'de, D>(deserializer: D) -> Result<Vec<Screenshot>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = serde::Deserialize::deserialize(deserializer)?;
    let entries = match raw {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(value = %other, "Stored screenshots are not a list; reading as empty");
            Vec::new()
        }
    };

    let readable = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<ScreenshotEncoding>(entry.clone()) {
            Ok(encoding) => Some(encoding),
            Err(e) => {
                warn!(entry = %entry, error = %e, "Skipping unreadable stored screenshot");
                None
            }
        })
        .collect();

    Ok(normalize_screenshots(readable))
}

#[derive(Debug, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl std::fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "index {} out of range for {} screenshots", self.index, self.len)
    }
}

fn check_index(shots: &[Screenshot], index: usize) -> Result<(), IndexOutOfRange> {
    if index < shots.len() {
        Ok(())
    } else {
        Err(IndexOutOfRange {
            index,
            len: shots.len(),
        })
    }
}

pub fn add_screenshot(shots: &mut Vec<Screenshot>, shot: Screenshot) {
    shots.push(shot);
}

pub fn edit_screenshot(
    shots: &mut [Screenshot],
    index: usize,
    shot: Screenshot,
) -> Result<(), IndexOutOfRange> {
    check_index(shots, index)?;
    shots[index] = shot;
    Ok(())
}

pub fn remove_screenshot(
    shots: &mut Vec<Screenshot>,
    index: usize,
) -> Result<Screenshot, IndexOutOfRange> {
    check_index(shots, index)?;
    Ok(shots.remove(index))
}

pub fn swap_screenshots(
    shots: &mut [Screenshot],
    a: usize,
    b: usize,
) -> Result<(), IndexOutOfRange> {
    check_index(shots, a)?;
    check_index(shots, b)?;
    shots.swap(a, b);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn shot(url: &str) -> Screenshot {
        Screenshot::new(url, None).unwrap()
    }

    #[test]
    fn bare_and_structured_normalize_to_the_same_shape() {
        let raw: Vec<ScreenshotEncoding> = serde_json::from_value(json!([
            "https://cdn.test/a.png",
            { "url": "https://cdn.test/b.png", "alt": "Lobby" },
            { "url": "https://cdn.test/c.png" },
        ]))
        .unwrap();

        assert_eq!(
            normalize_screenshots(raw),
            vec![
                shot("https://cdn.test/a.png"),
                Screenshot::new("https://cdn.test/b.png", Some("Lobby")).unwrap(),
                shot("https://cdn.test/c.png"),
            ]
        );
    }

    #[test]
    fn blank_urls_are_dropped_and_blank_alts_cleared() {
        let raw: Vec<ScreenshotEncoding> = serde_json::from_value(json!([
            "  ",
            { "url": " https://cdn.test/a.png ", "alt": "   " },
        ]))
        .unwrap();

        let out = normalize_screenshots(raw);
        assert_eq!(out, vec![shot("https://cdn.test/a.png")]);
        assert_eq!(
            serde_json::to_value(&out[0]).unwrap(),
            json!({ "url": "https://cdn.test/a.png" })
        );
    }

    #[test]
    fn swap_reorders_and_rejects_bad_indices() {
        let mut shots = vec![shot("a"), shot("b"), shot("c")];

        swap_screenshots(&mut shots, 0, 2).unwrap();
        let urls: Vec<_> = shots.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["c", "b", "a"]);

        assert_eq!(
            swap_screenshots(&mut shots, 1, 3),
            Err(IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn edit_and_remove_check_the_index() {
        let mut shots = vec![shot("a"), shot("b")];

        edit_screenshot(&mut shots, 1, shot("B")).unwrap();
        assert_eq!(shots[1].url, "B");
        assert!(edit_screenshot(&mut shots, 2, shot("x")).is_err());

        assert_eq!(remove_screenshot(&mut shots, 0).unwrap().url, "a");
        assert_eq!(shots, vec![shot("B")]);
        assert!(remove_screenshot(&mut shots, 1).is_err());
    }

    #[derive(Deserialize)]
    struct Stored {
        #[serde(default, deserialize_with = "deserialize_screenshots")]
        screenshots: Vec<Screenshot>,
    }

    #[test]
    fn unreadable_stored_entries_are_skipped() {
        let stored: Stored = serde_json::from_value(json!({
            "screenshots": [
                "https://cdn.test/a.png",
                null,
                42,
                { "alt": "no url" },
                { "url": "https://cdn.test/b.png", "alt": "B" },
            ]
        }))
        .unwrap();

        assert_eq!(
            stored.screenshots,
            vec![
                shot("https://cdn.test/a.png"),
                Screenshot::new("https://cdn.test/b.png", Some("B")).unwrap(),
            ]
        );
    }

    #[test]
    fn non_list_or_missing_screenshots_read_as_empty() {
        for value in [json!({}), json!({ "screenshots": null }), json!({ "screenshots": "oops" })] {
            let stored: Stored = serde_json::from_value(value).unwrap();
            assert!(stored.screenshots.is_empty());
        }
    }
}
