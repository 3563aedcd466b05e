use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    domain::blog::blog::{BlogPost, save_blog_post},
    dto::{requests::blog::submit_post_request::SubmitPostRequest, responses::response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

use super::save_error::blog_save_err;

#[utoipa::path(
    post,
    path = "/api/blog",
    tag = "blog",
    request_body = SubmitPostRequest,
    responses(
        (status = 201, description = "Post created with a unique slug", body = BlogPost),
        (status = 400, description = "Invalid post, or title has no letters or digits", body = CodeErrorResp),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 409, description = "Slug still taken after retries", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn submit_post(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitPostRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let post = save_blog_post(state.store(), &draft, None)
        .await
        .map_err(|e| blog_save_err(CodeError::DB_INSERTION_ERROR, e))?;

    info!(post_id = %post.id, slug = %post.slug, admin_id = %admin.admin_id, "Post created");

    Ok((StatusCode::CREATED, http_resp(post, (), start)))
}
