use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::{
        contact::ContactSubmission,
        domain_traits::{ContentKind, list_content},
    },
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/contact",
    tag = "admin",
    responses(
        (status = 200, description = "Contact form submissions, newest first", body = Vec<ContactSubmission>),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn admin_list_contact(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let submissions: Vec<ContactSubmission> =
        list_content(state.store(), &ContactSubmission::default_query())
            .await
            .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(submissions, (), start))
}
