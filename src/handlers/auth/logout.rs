use std::{str::FromStr, sync::Arc};

use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::responses::{
        auth::logout_response::LogoutResponse, response_data::http_resp_with_cookies,
    },
    errors::code_error::{CodeErrorResp, HandlerResponse},
    init::state::ServerState,
    util::time::now::tokio_now,
};

use super::session_cookie::{SESSION_COOKIE, session_cookie};

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logout successful; clears the session cookie", body = LogoutResponse),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn logout(
    cookie_jar: CookieJar,
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let session_id = cookie_jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::from_str(cookie.value()).ok());

    if let Some(session_id) = session_id {
        match state.remove_session(session_id).await {
            Ok((removed_session_id, session_count)) => {
                info!(
                    removed_session_id = %removed_session_id,
                    session_count = %session_count,
                    "Admin logout; session removed.",
                );
            }
            Err(e) => {
                warn!(error = %e, "Logout for a session that no longer exists");
            }
        }
    }

    Ok(http_resp_with_cookies(
        LogoutResponse {
            message: "Logout successful".to_owned(),
        },
        (),
        start,
        None,
        Some(vec![session_cookie(
            String::new(),
            state.get_deployment_environment(),
        )]),
    ))
}
