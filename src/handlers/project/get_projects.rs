use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    domain::{
        domain_traits::{ContentKind, list_content},
        filter::{RecordFilter, apply_filters},
        project::{Project, RealityType},
    },
    dto::{requests::project::project_request::GetProjectsQuery, responses::response_data::http_resp},
    errors::code_error::HandlerResponse,
    handlers::degrade::empty_on_error,
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    params(GetProjectsQuery),
    responses(
        (status = 200, description = "Projects matching every given filter, newest first", body = Vec<Project>)
    )
)]
pub async fn get_projects(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<GetProjectsQuery>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let projects = empty_on_error(
        list_content::<Project>(state.store(), &Project::default_query()).await,
        "projects",
    );

    let filters = [
        RecordFilter::search(query.q.as_deref(), &["title", "description"]),
        RecordFilter::exact("category", query.category.as_deref(), None),
        RecordFilter::exact(
            "reality_type",
            query.reality_type.as_deref(),
            Some(RealityType::default().as_str()),
        ),
    ];

    Ok(http_resp(apply_filters(projects, &filters), (), start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            domain_traits::create_content,
            project::ProjectDraft,
        },
        handlers::test_support::{memory_state, read_json},
    };

    fn draft(title: &str, category: &str, reality_type: RealityType) -> ProjectDraft {
        ProjectDraft {
            title: title.to_owned(),
            description: String::new(),
            category: category.to_owned(),
            featured: false,
            thumbnail_url: None,
            video_link: None,
            download_link: None,
            reality_type,
        }
    }

    fn query(q: Option<&str>, category: Option<&str>, reality_type: Option<&str>) -> Query<GetProjectsQuery> {
        Query(GetProjectsQuery {
            q: q.map(str::to_owned),
            category: category.map(str::to_owned),
            reality_type: reality_type.map(str::to_owned),
        })
    }

    fn titles(body: &serde_json::Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn query_parameters_compose() {
        let state = memory_state();
        for d in [
            draft("Museum Guide", "Education", RealityType::AR),
            draft("Space Walk", "Games", RealityType::VR),
            draft("Moon Museum", "Games", RealityType::MR),
        ] {
            create_content::<Project, _>(state.store(), &d).await.unwrap();
        }

        let (_, all) = read_json(get_projects(State(state.clone()), query(None, Some("All"), Some("All"))).await).await;
        assert_eq!(titles(&all).len(), 3);

        let (_, games_museum) =
            read_json(get_projects(State(state.clone()), query(Some("museum"), Some("Games"), None)).await).await;
        assert_eq!(titles(&games_museum), vec!["Moon Museum"]);

        let (_, vr) = read_json(get_projects(State(state), query(None, None, Some("VR"))).await).await;
        assert_eq!(titles(&vr), vec!["Space Walk"]);
    }
}
