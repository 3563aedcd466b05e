use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;

use crate::{
    domain::{
        blog::blog::{BlogPost, find_post_by_slug},
        domain_traits::delete_content,
    },
    dto::responses::{delete_response::DeleteResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

#[utoipa::path(
    delete,
    path = "/api/blog/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post deleted", body = DeleteResponse),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn delete_post(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let post = find_post_by_slug(state.store(), &slug)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| code_err(CodeError::POST_NOT_FOUND, format!("no post with slug {slug:?}")))?;

    delete_content::<BlogPost>(state.store(), post.id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    info!(deleted_post_id = %post.id, slug = %slug, admin_id = %admin.admin_id, "Post deleted");

    Ok(http_resp(DeleteResponse { deleted_id: post.id }, (), start))
}
