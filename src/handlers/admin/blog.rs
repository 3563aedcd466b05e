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
        blog::blog::{BlogPost, save_blog_post},
        domain_traits::{ContentKind, delete_content, list_content},
    },
    dto::{
        requests::blog::submit_post_request::SubmitPostRequest,
        responses::{delete_response::DeleteResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    handlers::blog::save_error::blog_save_err,
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/blog",
    tag = "admin",
    responses(
        (status = 200, description = "All posts including drafts, newest first", body = Vec<BlogPost>),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn admin_list_posts(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let posts: Vec<BlogPost> = list_content(state.store(), &BlogPost::default_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(posts, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/blog",
    tag = "admin",
    request_body = SubmitPostRequest,
    responses(
        (status = 201, description = "Post created with a unique slug", body = BlogPost),
        (status = 400, description = "Invalid post", body = CodeErrorResp),
        (status = 409, description = "Slug still taken after retries", body = CodeErrorResp)
    )
)]
pub async fn admin_create_post(
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

#[utoipa::path(
    put,
    path = "/api/admin/blog/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = SubmitPostRequest,
    responses(
        (status = 200, description = "Post updated; the slug follows the title", body = BlogPost),
        (status = 400, description = "Invalid post", body = CodeErrorResp),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn admin_update_post(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitPostRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let post = save_blog_post(state.store(), &draft, Some(id))
        .await
        .map_err(|e| blog_save_err(CodeError::DB_UPDATE_ERROR, e))?;

    info!(post_id = %post.id, slug = %post.slug, admin_id = %admin.admin_id, "Post updated");

    Ok(http_resp(post, (), start))
}

#[utoipa::path(
    delete,
    path = "/api/admin/blog/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = DeleteResponse),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn admin_delete_post(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    delete_content::<BlogPost>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    info!(deleted_post_id = %id, admin_id = %admin.admin_id, "Post deleted");

    Ok(http_resp(DeleteResponse { deleted_id: id }, (), start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{admin, memory_state, read_json};

    fn request(title: &str, published: bool) -> Json<SubmitPostRequest> {
        Json(
            serde_json::from_value(serde_json::json!({
                "title": title,
                "content": "<p>x</p>",
                "published": published,
            }))
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn admin_list_includes_drafts() {
        let state = memory_state();
        for (title, published) in [("Live", true), ("Draft", false)] {
            admin_create_post(Extension(admin()), State(state.clone()), request(title, published))
                .await
                .unwrap();
        }

        let (_, body) = read_json(admin_list_posts(State(state)).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_by_id_keeps_the_slug_for_the_same_title() {
        let state = memory_state();
        let (_, created) =
            read_json(admin_create_post(Extension(admin()), State(state.clone()), request("Demo", true)).await).await;
        let id: Uuid = serde_json::from_value(created["data"]["id"].clone()).unwrap();

        let (_, updated) = read_json(
            admin_update_post(Extension(admin()), State(state), Path(id), request("Demo", false)).await,
        )
        .await;

        assert_eq!(updated["data"]["slug"], "demo");
        assert_eq!(updated["data"]["published"], false);
    }
}
