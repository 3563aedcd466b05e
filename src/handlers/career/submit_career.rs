use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    domain::{career::Career, domain_traits::create_content},
    dto::{requests::career::career_request::CareerRequest, responses::response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    post,
    path = "/api/careers",
    tag = "careers",
    request_body = CareerRequest,
    responses(
        (status = 201, description = "Position created", body = Career),
        (status = 400, description = "Invalid position", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn submit_career(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CareerRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let career: Career = create_content(state.store(), &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?;

    info!(career_id = %career.id, title = %career.title, "Career created");

    Ok((StatusCode::CREATED, http_resp(career, (), start)))
}
