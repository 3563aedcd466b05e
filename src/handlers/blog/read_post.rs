use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    domain::blog::blog::{BlogPost, find_post_by_slug},
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post; drafts only for a signed-in admin", body = BlogPost),
        (status = 404, description = "No such post", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn read_post(
    Extension(auth_status): Extension<AuthStatus>,
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let post = find_post_by_slug(state.store(), &slug)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
        .filter(|post| post.published || auth_status.is_logged_in())
        .ok_or_else(|| code_err(CodeError::POST_NOT_FOUND, format!("no post with slug {slug:?}")))?;

    Ok(http_resp(post, (), start))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::{
        domain::blog::blog::{BlogPostDraft, save_blog_post},
        handlers::test_support::{admin, memory_state, read_json},
    };

    #[tokio::test]
    async fn drafts_are_hidden_from_visitors() {
        let state = memory_state();
        let draft = BlogPostDraft {
            title: "Coming Soon".to_owned(),
            excerpt: None,
            content: "tbd".to_owned(),
            image_url: None,
            published: false,
        };
        save_blog_post(state.store(), &draft, None).await.unwrap();

        let path = || Path("coming-soon".to_owned());
        let (visitor, _) =
            read_json(read_post(Extension(AuthStatus::LoggedOut), State(state.clone()), path()).await).await;
        let (admin_view, body) = read_json(
            read_post(Extension(AuthStatus::LoggedIn(admin())), State(state.clone()), path()).await,
        )
        .await;

        assert_eq!(visitor, StatusCode::NOT_FOUND);
        assert_eq!(admin_view, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Coming Soon");
    }
}
