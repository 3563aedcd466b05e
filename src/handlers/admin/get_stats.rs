use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::dashboard::{DashboardStats, collect_stats},
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    responses(
        (status = 200, description = "Record counts for the dashboard", body = DashboardStats),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn get_stats(State(state): State<Arc<ServerState>>) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let stats = collect_stats(state.store())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(stats, (), start))
}
