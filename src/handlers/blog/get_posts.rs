use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    domain::{
        blog::blog::{BlogPost, published_posts_query},
        domain_traits::list_content,
        filter::{RecordFilter, apply_filters},
    },
    dto::{requests::blog::get_posts_request::GetPostsQuery, responses::response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/blog",
    tag = "blog",
    params(GetPostsQuery),
    responses(
        (status = 200, description = "Published posts, newest first", body = Vec<BlogPost>),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn get_posts(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<GetPostsQuery>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let posts: Vec<BlogPost> = list_content(state.store(), &published_posts_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    let filters = [RecordFilter::search(query.q.as_deref(), &["title", "excerpt"])];

    Ok(http_resp(apply_filters(posts, &filters), (), start))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        store::{Collection, memory::fields},
        handlers::test_support::{memory_state, read_json},
    };

    #[tokio::test]
    async fn one_bad_stored_screenshot_does_not_break_the_list() {
        let state = memory_state();
        for (title, slug, screenshots) in [
            ("Clean", "clean", json!(["https://cdn.test/a.png"])),
            ("Dirty", "dirty", json!(["https://cdn.test/b.png", null, { "alt": "x" }])),
        ] {
            state
                .store()
                .insert(
                    Collection::BlogPosts,
                    fields(json!({
                        "title": title,
                        "slug": slug,
                        "published": true,
                        "screenshots": screenshots,
                    })),
                )
                .await
                .unwrap();
        }

        let (status, body) =
            read_json(get_posts(State(state), Query(GetPostsQuery { q: None })).await).await;

        assert_eq!(status, StatusCode::OK);
        let posts = body["data"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        let dirty = posts.iter().find(|p| p["slug"] == "dirty").unwrap();
        assert_eq!(dirty["screenshots"], json!([{ "url": "https://cdn.test/b.png" }]));
    }
}
