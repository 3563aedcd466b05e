use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;

use crate::{
    domain::blog::blog::{BlogPost, find_post_by_slug, save_blog_post},
    dto::{requests::blog::submit_post_request::SubmitPostRequest, responses::response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

use super::save_error::blog_save_err;

#[utoipa::path(
    put,
    path = "/api/blog/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Current slug of the post")),
    request_body = SubmitPostRequest,
    responses(
        (status = 200, description = "Post updated; the slug follows the new title", body = BlogPost),
        (status = 400, description = "Invalid post", body = CodeErrorResp),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn update_post(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    Json(request): Json<SubmitPostRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;

    let existing = find_post_by_slug(state.store(), &slug)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| code_err(CodeError::POST_NOT_FOUND, format!("no post with slug {slug:?}")))?;

    let post = save_blog_post(state.store(), &draft, Some(existing.id))
        .await
        .map_err(|e| blog_save_err(CodeError::DB_UPDATE_ERROR, e))?;

    info!(
        post_id = %post.id,
        old_slug = %slug,
        new_slug = %post.slug,
        admin_id = %admin.admin_id,
        "Post updated"
    );

    Ok(http_resp(post, (), start))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::handlers::test_support::{admin, memory_state, read_json};

    fn request(title: &str) -> Json<SubmitPostRequest> {
        Json(
            serde_json::from_value(serde_json::json!({ "title": title, "content": "x" })).unwrap(),
        )
    }

    async fn call(state: &Arc<ServerState>, slug: &str, title: &str) -> (StatusCode, serde_json::Value) {
        read_json(
            update_post(
                Extension(admin()),
                State(state.clone()),
                Path(slug.to_owned()),
                request(title),
            )
            .await,
        )
        .await
    }

    #[tokio::test]
    async fn resave_keeps_slug_and_retitle_moves_it() {
        let state = memory_state();
        let draft = request("Demo").0.into_draft().unwrap();
        save_blog_post(state.store(), &draft, None).await.unwrap();

        let (_, same) = call(&state, "demo", "Demo").await;
        assert_eq!(same["data"]["slug"], "demo");

        let (_, moved) = call(&state, "demo", "Demo Reloaded").await;
        assert_eq!(moved["data"]["slug"], "demo-reloaded");

        let (gone, _) = call(&state, "demo", "Demo").await;
        assert_eq!(gone, StatusCode::NOT_FOUND);
    }
}
