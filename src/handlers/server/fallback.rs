use axum::{http::Uri, response::IntoResponse};

use crate::errors::code_error::{CodeError, HandlerResponse, code_err};

pub async fn fallback_handler(uri: Uri) -> HandlerResponse<impl IntoResponse> {
    Err::<(), _>(code_err(CodeError::NOT_FOUND, format!("No route for {uri}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::read_json;

    #[tokio::test]
    async fn unknown_paths_are_404_envelopes() {
        let uri: Uri = "/api/nope".parse().unwrap();
        let (status, body) = read_json(fallback_handler(uri).await).await;

        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No route for /api/nope");
    }
}
