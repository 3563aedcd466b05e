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
        event::Event,
    },
    dto::{
        requests::event::event_request::EventRequest,
        responses::{delete_response::DeleteResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/events",
    tag = "admin",
    responses(
        (status = 200, description = "All events by date", body = Vec<Event>),
        (status = 401, description = "Not signed in", body = CodeErrorResp)
    )
)]
pub async fn admin_list_events(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let events: Vec<Event> = list_content(state.store(), &Event::default_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(events, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/events",
    tag = "admin",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid event or date", body = CodeErrorResp)
    )
)]
pub async fn admin_create_event(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<EventRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let event: Event = create_content(state.store(), &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?;

    info!(event_id = %event.id, date = %event.date, admin_id = %admin.admin_id, "Event created");

    Ok((StatusCode::CREATED, http_resp(event, (), start)))
}

#[utoipa::path(
    put,
    path = "/api/admin/events/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "No such event", body = CodeErrorResp)
    )
)]
pub async fn admin_update_event(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<EventRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let event: Event = update_content(state.store(), id, &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_UPDATE_ERROR, e))?;

    info!(event_id = %id, admin_id = %admin.admin_id, "Event updated");

    Ok(http_resp(event, (), start))
}

#[utoipa::path(
    delete,
    path = "/api/admin/events/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = DeleteResponse),
        (status = 404, description = "No such event", body = CodeErrorResp)
    )
)]
pub async fn admin_delete_event(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    delete_content::<Event>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    info!(deleted_event_id = %id, admin_id = %admin.admin_id, "Event deleted");

    Ok(http_resp(DeleteResponse { deleted_id: id }, (), start))
}
