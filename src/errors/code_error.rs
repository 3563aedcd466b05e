use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
};
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

use crate::store::StoreError;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
}

impl CodeError {
    pub const DB_CONNECTION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::SERVICE_UNAVAILABLE,
        message: "The content store is unavailable.",
        log_level: Level::ERROR,
    };
    pub const DB_QUERY_ERROR: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database query failed!",
        log_level: Level::ERROR,
    };
    pub const DB_INSERTION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database insertion failed!",
        log_level: Level::ERROR,
    };
    pub const DB_UPDATE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database update failed!",
        log_level: Level::ERROR,
    };
    pub const DB_DELETION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database deletion failed!",
        log_level: Level::ERROR,
    };
    pub const DB_DECODE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 5,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Stored record could not be read.",
        log_level: Level::ERROR,
    };
    pub const UNIQUE_CONFLICT: CodeError = CodeError {
        success: false,
        error_code: 6,
        http_status_code: StatusCode::CONFLICT,
        message: "A record with the same unique value already exists.",
        log_level: Level::WARN,
    };
    pub const INVALID_REQUEST: CodeError = CodeError {
        success: false,
        error_code: 10,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Invalid request.",
        log_level: Level::INFO,
    };
    pub const TITLE_HAS_NO_SLUG: CodeError = CodeError {
        success: false,
        error_code: 11,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Title must contain at least one ASCII letter or digit.",
        log_level: Level::INFO,
    };
    pub const EMAIL_INVALID: CodeError = CodeError {
        success: false,
        error_code: 12,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Invalid email address.",
        log_level: Level::INFO,
    };
    pub const URL_INVALID: CodeError = CodeError {
        success: false,
        error_code: 13,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "URL must be an absolute http or https address.",
        log_level: Level::INFO,
    };
    pub const DATE_INVALID: CodeError = CodeError {
        success: false,
        error_code: 14,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Date must be an RFC 3339 timestamp.",
        log_level: Level::INFO,
    };
    pub const SCREENSHOT_INDEX_OUT_OF_RANGE: CodeError = CodeError {
        success: false,
        error_code: 15,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Screenshot index out of range.",
        log_level: Level::INFO,
    };
    pub const UNAUTHORIZED_ACCESS: CodeError = CodeError {
        success: false,
        error_code: 20,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Unauthorized access.",
        log_level: Level::INFO,
    };
    pub const WRONG_CREDENTIALS: CodeError = CodeError {
        success: false,
        error_code: 21,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Wrong email or password.",
        log_level: Level::INFO,
    };
    pub const COULD_NOT_VERIFY_PW: CodeError = CodeError {
        success: false,
        error_code: 22,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not verify password.",
        log_level: Level::ERROR,
    };
    pub const SESSION_ID_ALREADY_EXISTS: CodeError = CodeError {
        success: false,
        error_code: 23,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Session ID already exists.",
        log_level: Level::ERROR,
    };
    pub const RECORD_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 30,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Record not found.",
        log_level: Level::INFO,
    };
    pub const POST_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 31,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Post not found.",
        log_level: Level::INFO,
    };
    pub const PROJECT_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 32,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Project not found.",
        log_level: Level::INFO,
    };
    pub const NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 33,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Route not found.",
        log_level: Level::INFO,
    };
}

pub fn code_err(cerr: CodeError, e: impl ToString) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message.to_string(),
        error: e.to_string(),
        log_level: cerr.log_level,
    }
}

/// Maps a store failure onto the code a handler should answer with.
/// `fallback` is used for plain query failures, so writes can say which write failed.
pub fn store_err(fallback: CodeError, e: StoreError) -> CodeErrorResp {
    match e {
        StoreError::Unavailable(_) => code_err(CodeError::DB_CONNECTION_ERROR, e),
        StoreError::Conflict(_) => code_err(CodeError::UNIQUE_CONFLICT, e),
        StoreError::NotFound(_) => code_err(CodeError::RECORD_NOT_FOUND, e),
        StoreError::Decode(_) => code_err(CodeError::DB_DECODE_ERROR, e),
        StoreError::Query(_) => code_err(fallback, e),
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        CodeErrorResp {
            success: cerr.success,
            error_code: cerr.error_code,
            http_status_code: cerr.http_status_code,
            message: cerr.message.to_string(),
            error: cerr.message.to_string(),
            log_level: cerr.log_level,
        }
    }
}

impl From<StoreError> for CodeErrorResp {
    fn from(e: StoreError) -> Self {
        store_err(CodeError::DB_QUERY_ERROR, e)
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    pub message: String,
    pub error: String,
    #[serde(skip)]
    pub log_level: Level,
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error)
    }
}

impl Error for CodeErrorResp {}

// Logging happens in the log middleware, which reads and strips the x-error-* headers.
impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        let mut response = (
            self.http_status_code,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        let headers = response.headers_mut();
        if let Ok(v) = HeaderValue::from_str(self.log_level.as_str()) {
            headers.insert("x-error-log-level", v);
        }
        headers.insert(
            "x-error-status-code",
            HeaderValue::from(self.http_status_code.as_u16()),
        );
        headers.insert("x-error-code", HeaderValue::from(self.error_code));
        if let Ok(v) = HeaderValue::from_str(&self.message) {
            headers.insert("x-error-message", v);
        }
        // Header values must be visible ASCII; anything else stays in the body only.
        let detail: String = self
            .error
            .chars()
            .filter(|c| c.is_ascii() && !c.is_ascii_control())
            .collect();
        if let Ok(v) = HeaderValue::from_str(&detail) {
            headers.insert("x-error-detail", v);
        }

        response
    }
}
