use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use crate::errors::code_error::{CodeError, CodeErrorResp, code_err};

/// Trims `value` and rejects it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, CodeErrorResp> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(code_err(
            CodeError::INVALID_REQUEST,
            format!("{field} must not be blank"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Blank optional text collapses to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

pub fn require_url(field: &str, value: &str) -> Result<String, CodeErrorResp> {
    let trimmed = require_text(field, value)?;
    match Url::parse(&trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(trimmed),
        Ok(url) => Err(code_err(
            CodeError::URL_INVALID,
            format!("{field}: unsupported scheme {}", url.scheme()),
        )),
        Err(e) => Err(code_err(CodeError::URL_INVALID, format!("{field}: {e}"))),
    }
}

pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>, CodeErrorResp> {
    optional_text(value)
        .map(|v| require_url(field, &v))
        .transpose()
}

pub fn require_email(value: &str) -> Result<String, CodeErrorResp> {
    let trimmed = value.trim();
    if !email_address::EmailAddress::is_valid(trimmed) {
        return Err(code_err(CodeError::EMAIL_INVALID, trimmed));
    }
    Ok(trimmed.to_owned())
}

/// Parses an RFC 3339 timestamp and re-renders it in UTC with second precision,
/// so stored dates order the same as text and as time.
pub fn normalize_timestamp(field: &str, value: &str) -> Result<String, CodeErrorResp> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())
        .map_err(|e| code_err(CodeError::DATE_INVALID, format!("{field}: {e}")))?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
