use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    domain::{contact::ContactSubmission, domain_traits::create_content},
    dto::{requests::contact::contact_request::ContactRequest, responses::response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactSubmission),
        (status = 400, description = "Blank field or invalid email", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ContactRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let submission: ContactSubmission = create_content(state.store(), &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?;

    info!(submission_id = %submission.id, "Contact form submitted");

    Ok((StatusCode::CREATED, http_resp(submission, (), start)))
}
