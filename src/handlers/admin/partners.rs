use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        domain_traits::{ContentKind, create_content, delete_content, list_content, update_content},
        partner::Partner,
    },
    dto::{
        requests::partner::partner_request::PartnerRequest,
        responses::{delete_response::DeleteResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/partners",
    tag = "admin",
    responses(
        (status = 200, description = "All partners, newest first", body = Vec<Partner>),
        (status = 401, description = "Not signed in", body = CodeErrorResp)
    )
)]
pub async fn admin_list_partners(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let partners: Vec<Partner> = list_content(state.store(), &Partner::default_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(partners, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/partners",
    tag = "admin",
    request_body = PartnerRequest,
    responses(
        (status = 201, description = "Partner created", body = Partner),
        (status = 400, description = "Invalid partner", body = CodeErrorResp)
    )
)]
pub async fn admin_create_partner(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<PartnerRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let partner: Partner = create_content(state.store(), &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?;

    info!(partner_id = %partner.id, admin_id = %admin.admin_id, "Partner created");

    Ok((StatusCode::CREATED, http_resp(partner, (), start)))
}

#[utoipa::path(
    put,
    path = "/api/admin/partners/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Partner id")),
    request_body = PartnerRequest,
    responses(
        (status = 200, description = "Partner updated", body = Partner),
        (status = 404, description = "No such partner", body = CodeErrorResp)
    )
)]
pub async fn admin_update_partner(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<PartnerRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let partner: Partner = update_content(state.store(), id, &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_UPDATE_ERROR, e))?;

    info!(partner_id = %id, admin_id = %admin.admin_id, "Partner updated");

    Ok(http_resp(partner, (), start))
}

#[utoipa::path(
    delete,
    path = "/api/admin/partners/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Partner id")),
    responses(
        (status = 200, description = "Partner deleted", body = DeleteResponse),
        (status = 404, description = "No such partner", body = CodeErrorResp)
    )
)]
pub async fn admin_delete_partner(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    delete_content::<Partner>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    info!(deleted_partner_id = %id, admin_id = %admin.admin_id, "Partner deleted");

    Ok(http_resp(DeleteResponse { deleted_id: id }, (), start))
}
