use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::responses::response_data::http_resp, errors::code_error::HandlerResponse,
    init::state::ServerState, util::time::now::tokio_now,
};

#[derive(Serialize, ToSchema)]
pub struct ServerHealthcheckResponse {
    pub app_name_version: String,
    pub build_time: &'static str,
    pub axum_version: &'static str,
    pub rust_version: &'static str,
    pub uptime_seconds: u64,
    pub responses_handled: u64,
    pub active_sessions: usize,
}

#[utoipa::path(
    get,
    path = "/api/healthcheck/server",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = ServerHealthcheckResponse)
    )
)]
pub async fn healthcheck(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    Ok(http_resp(
        ServerHealthcheckResponse {
            app_name_version: state.get_app_name_version(),
            build_time: env!("BUILD_TIME"),
            axum_version: env!("AXUM_VERSION"),
            rust_version: env!("RUSTC_VERSION"),
            uptime_seconds: state.get_uptime().as_secs(),
            responses_handled: state.get_responses_handled(),
            active_sessions: state.get_session_length(),
        },
        (),
        start,
    ))
}
