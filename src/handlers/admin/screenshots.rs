use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        blog::blog::{BlogPost, write_screenshots},
        domain_traits::get_content,
        screenshot::{
            IndexOutOfRange, Screenshot, add_screenshot, edit_screenshot, remove_screenshot,
            swap_screenshots,
        },
    },
    dto::{
        requests::blog::screenshot_request::{ScreenshotRequest, SwapScreenshotsRequest},
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

async fn load_post(state: &ServerState, id: Uuid) -> Result<BlogPost, CodeErrorResp> {
    get_content::<BlogPost>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| code_err(CodeError::POST_NOT_FOUND, format!("no post {id}")))
}

/// Loads the post, applies `edit` to its screenshots and writes the whole
/// sequence back. Returns the stored sequence.
async fn edit_and_write<F>(
    state: &ServerState,
    id: Uuid,
    edit: F,
) -> Result<Vec<Screenshot>, CodeErrorResp>
where
    F: FnOnce(&mut Vec<Screenshot>) -> Result<(), IndexOutOfRange>,
{
    let mut shots = load_post(state, id).await?.screenshots;
    edit(&mut shots).map_err(|e| code_err(CodeError::SCREENSHOT_INDEX_OUT_OF_RANGE, e))?;

    let post = write_screenshots(state.store(), id, &shots)
        .await
        .map_err(|e| store_err(CodeError::DB_UPDATE_ERROR, e))?;

    Ok(post.screenshots)
}

#[utoipa::path(
    get,
    path = "/api/admin/blog/{id}/screenshots",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post's screenshots in order", body = Vec<Screenshot>),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn list_screenshots(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let post = load_post(&state, id).await?;

    Ok(http_resp(post.screenshots, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/blog/{id}/screenshots",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = ScreenshotRequest,
    responses(
        (status = 200, description = "Screenshot appended", body = Vec<Screenshot>),
        (status = 400, description = "Blank url", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn add_post_screenshot(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<ScreenshotRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let shot = request.into_screenshot()?;
    let shots = edit_and_write(&state, id, |shots| {
        add_screenshot(shots, shot);
        Ok(())
    })
    .await?;

    info!(post_id = %id, count = shots.len(), admin_id = %admin.admin_id, "Screenshot added");

    Ok(http_resp(shots, (), start))
}

#[utoipa::path(
    put,
    path = "/api/admin/blog/{id}/screenshots/{index}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Post id"),
        ("index" = usize, Path, description = "Zero-based position")
    ),
    request_body = ScreenshotRequest,
    responses(
        (status = 200, description = "Screenshot replaced", body = Vec<Screenshot>),
        (status = 400, description = "Blank url or index out of range", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn edit_post_screenshot(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<ScreenshotRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let shot = request.into_screenshot()?;
    let shots = edit_and_write(&state, id, |shots| edit_screenshot(shots, index, shot)).await?;

    info!(post_id = %id, index, admin_id = %admin.admin_id, "Screenshot edited");

    Ok(http_resp(shots, (), start))
}

#[utoipa::path(
    delete,
    path = "/api/admin/blog/{id}/screenshots/{index}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Post id"),
        ("index" = usize, Path, description = "Zero-based position")
    ),
    responses(
        (status = 200, description = "Screenshot removed", body = Vec<Screenshot>),
        (status = 400, description = "Index out of range", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn delete_post_screenshot(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let shots = edit_and_write(&state, id, |shots| {
        remove_screenshot(shots, index).map(|_| ())
    })
    .await?;

    info!(post_id = %id, index, admin_id = %admin.admin_id, "Screenshot removed");

    Ok(http_resp(shots, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/blog/{id}/screenshots/swap",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = SwapScreenshotsRequest,
    responses(
        (status = 200, description = "Two screenshots swapped", body = Vec<Screenshot>),
        (status = 400, description = "Index out of range", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn swap_post_screenshots(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SwapScreenshotsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let shots = edit_and_write(&state, id, |shots| {
        swap_screenshots(shots, request.a, request.b)
    })
    .await?;

    info!(post_id = %id, a = request.a, b = request.b, admin_id = %admin.admin_id, "Screenshots swapped");

    Ok(http_resp(shots, (), start))
}
