use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::warn;

use crate::{
    domain::{
        blog::blog::{BlogPost, find_post_by_slug, related_posts_query},
        domain_traits::list_content,
    },
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    handlers::degrade::empty_on_error,
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    util::time::now::tokio_now,
};

pub const RELATED_POSTS_LIMIT: usize = 3;

#[utoipa::path(
    get,
    path = "/api/blog/{slug}/related",
    tag = "blog",
    params(("slug" = String, Path, description = "Slug of the post being read")),
    responses(
        (status = 200, description = "Up to three other published posts; empty when the store is down", body = Vec<BlogPost>),
        (status = 404, description = "No such post", body = CodeErrorResp)
    )
)]
pub async fn related_posts(
    Extension(auth_status): Extension<AuthStatus>,
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let current = match find_post_by_slug(state.store(), &slug).await {
        Ok(Some(post)) if post.published || auth_status.is_logged_in() => post,
        Ok(_) => {
            return Err(code_err(
                CodeError::POST_NOT_FOUND,
                format!("no post with slug {slug:?}"),
            ));
        }
        Err(e) => {
            warn!(slug = %slug, error = %e, "Could not look up post for related posts");
            return Ok(http_resp(Vec::<BlogPost>::new(), (), start));
        }
    };

    let related = empty_on_error(
        list_content::<BlogPost>(
            state.store(),
            &related_posts_query(current.id, RELATED_POSTS_LIMIT),
        )
        .await,
        "related_posts",
    );

    Ok(http_resp(related, (), start))
}
