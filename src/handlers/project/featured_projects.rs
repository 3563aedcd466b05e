use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::{
        domain_traits::{ContentKind, list_content},
        project::{Project, distinct_categories, featured_projects_query},
    },
    dto::responses::{
        project::featured_projects_response::FeaturedProjectsResponse, response_data::http_resp,
    },
    errors::code_error::HandlerResponse,
    handlers::degrade::empty_on_error,
    init::state::ServerState,
    util::time::now::tokio_now,
};

pub const FEATURED_PROJECTS_LIMIT: usize = 6;

#[utoipa::path(
    get,
    path = "/api/projects/featured",
    tag = "projects",
    responses(
        (status = 200, description = "Featured projects for the home page and all categories", body = FeaturedProjectsResponse)
    )
)]
pub async fn featured_projects(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();
    let store = state.store();

    let featured_query = featured_projects_query(FEATURED_PROJECTS_LIMIT);
    let all_query = Project::default_query();
    let (featured, all) = tokio::join!(
        list_content::<Project>(store, &featured_query),
        list_content::<Project>(store, &all_query),
    );

    Ok(http_resp(
        FeaturedProjectsResponse {
            projects: empty_on_error(featured, "featured_projects"),
            categories: distinct_categories(&empty_on_error(all, "project_categories")),
        },
        (),
        start,
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        domain::{domain_traits::create_content, project::{ProjectDraft, RealityType}},
        handlers::test_support::{memory_state, read_json, unavailable_state},
    };

    #[tokio::test]
    async fn featured_list_is_capped_and_categories_span_all_projects() {
        let state = memory_state();
        for i in 0..8 {
            let draft = ProjectDraft {
                title: format!("Project {i}"),
                description: String::new(),
                category: if i % 2 == 0 { "Games" } else { "Training" }.to_owned(),
                featured: i != 7,
                thumbnail_url: None,
                video_link: None,
                download_link: None,
                reality_type: RealityType::MR,
            };
            create_content::<Project, _>(state.store(), &draft).await.unwrap();
        }

        let (status, body) = read_json(featured_projects(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["projects"].as_array().unwrap().len(), FEATURED_PROJECTS_LIMIT);
        assert_eq!(body["data"]["categories"], json!(["Games", "Training"]));
    }

    #[tokio::test]
    async fn store_outage_degrades_to_empty_lists() {
        let (status, body) = read_json(featured_projects(State(unavailable_state())).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({ "projects": [], "categories": [] }));
    }
}
