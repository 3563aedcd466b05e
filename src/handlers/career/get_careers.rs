use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::{
        career::Career,
        domain_traits::{ContentKind, list_content},
    },
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/careers",
    tag = "careers",
    responses(
        (status = 200, description = "Open positions, newest first", body = Vec<Career>),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn get_careers(State(state): State<Arc<ServerState>>) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let careers: Vec<Career> = list_content(state.store(), &Career::default_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(careers, (), start))
}
