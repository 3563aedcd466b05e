use axum::{Extension, response::IntoResponse};

use crate::{
    dto::responses::{auth::me_response::MeResponse, response_data::http_resp},
    errors::code_error::{CodeErrorResp, HandlerResponse},
    init::state::Session,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "The signed-in admin", body = MeResponse),
        (status = 401, description = "Not signed in", body = CodeErrorResp)
    )
)]
pub async fn me(Extension(session): Extension<Session>) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    Ok(http_resp(
        MeResponse {
            admin: session.current_user(),
            session_expires_at: session.expires_at,
        },
        (),
        start,
    ))
}
