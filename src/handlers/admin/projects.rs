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
        domain_traits::{ContentKind, create_content, delete_content, list_content, update_content},
        project::{Project, ProjectWithScreenshots, list_project_screenshots, replace_project_screenshots},
    },
    dto::{
        requests::project::project_request::ProjectRequest,
        responses::{delete_response::DeleteResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/projects",
    tag = "admin",
    responses(
        (status = 200, description = "All projects, newest first", body = Vec<Project>),
        (status = 401, description = "Not signed in", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn admin_list_projects(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let projects: Vec<Project> = list_content(state.store(), &Project::default_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(projects, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/projects",
    tag = "admin",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectWithScreenshots),
        (status = 400, description = "Invalid project", body = CodeErrorResp),
        (status = 401, description = "Not signed in", body = CodeErrorResp)
    )
)]
pub async fn admin_create_project(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ProjectRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let (draft, screenshot_urls) = request.into_parts()?;

    let project: Project = create_content(state.store(), &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?;

    let screenshots = match screenshot_urls {
        Some(urls) => replace_project_screenshots(state.store(), project.id, &urls)
            .await
            .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?,
        None => Vec::new(),
    };

    info!(
        project_id = %project.id,
        screenshots = screenshots.len(),
        admin_id = %admin.admin_id,
        "Project created"
    );

    Ok((
        StatusCode::CREATED,
        http_resp(
            ProjectWithScreenshots {
                project,
                screenshots,
            },
            (),
            start,
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/projects/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated; screenshots replaced when sent", body = ProjectWithScreenshots),
        (status = 400, description = "Invalid project", body = CodeErrorResp),
        (status = 404, description = "No such project", body = CodeErrorResp)
    )
)]
pub async fn admin_update_project(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProjectRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let (draft, screenshot_urls) = request.into_parts()?;

    let project: Project = update_content(state.store(), id, &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_UPDATE_ERROR, e))?;

    let screenshots = match screenshot_urls {
        Some(urls) => replace_project_screenshots(state.store(), id, &urls).await,
        None => list_project_screenshots(state.store(), id).await,
    }
    .map_err(|e| store_err(CodeError::DB_UPDATE_ERROR, e))?;

    info!(project_id = %id, admin_id = %admin.admin_id, "Project updated");

    Ok(http_resp(
        ProjectWithScreenshots {
            project,
            screenshots,
        },
        (),
        start,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/projects/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project and its screenshots deleted", body = DeleteResponse),
        (status = 404, description = "No such project", body = CodeErrorResp)
    )
)]
pub async fn admin_delete_project(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    delete_content::<Project>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    replace_project_screenshots(state.store(), id, &[])
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    info!(deleted_project_id = %id, admin_id = %admin.admin_id, "Project deleted");

    Ok(http_resp(DeleteResponse { deleted_id: id }, (), start))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handlers::test_support::{admin, memory_state, read_json};

    fn request(body: serde_json::Value) -> Json<ProjectRequest> {
        Json(serde_json::from_value(body).unwrap())
    }

    fn urls(body: &serde_json::Value) -> Vec<String> {
        body["data"]["screenshots"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["image_url"].as_str().unwrap().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn screenshots_follow_the_request() {
        let state = memory_state();

        let (status, created) = read_json(
            admin_create_project(
                Extension(admin()),
                State(state.clone()),
                request(json!({
                    "title": "Space Walk",
                    "category": "Games",
                    "screenshots": ["https://cdn.test/1.png", "https://cdn.test/2.png"],
                })),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["reality_type"], "AR");
        let id: Uuid = serde_json::from_value(created["data"]["id"].clone()).unwrap();

        let update = |body| {
            admin_update_project(Extension(admin()), State(state.clone()), Path(id), request(body))
        };

        let (_, untouched) = read_json(update(json!({ "title": "Space Walk 2", "category": "Games" })).await).await;
        assert_eq!(urls(&untouched), vec!["https://cdn.test/1.png", "https://cdn.test/2.png"]);
        assert_eq!(untouched["data"]["title"], "Space Walk 2");

        let (_, replaced) = read_json(
            update(json!({ "title": "Space Walk 2", "category": "Games", "screenshots": ["https://cdn.test/3.png"] }))
                .await,
        )
        .await;
        assert_eq!(urls(&replaced), vec!["https://cdn.test/3.png"]);

        let (_, cleared) =
            read_json(update(json!({ "title": "Space Walk 2", "category": "Games", "screenshots": [] })).await).await;
        assert!(urls(&cleared).is_empty());
    }

    #[tokio::test]
    async fn updating_or_deleting_a_missing_project_is_a_404() {
        let state = memory_state();
        let id = Uuid::new_v4();

        let (update_status, _) = read_json(
            admin_update_project(
                Extension(admin()),
                State(state.clone()),
                Path(id),
                request(json!({ "title": "Ghost", "category": "Games" })),
            )
            .await,
        )
        .await;
        let (delete_status, _) =
            read_json(admin_delete_project(Extension(admin()), State(state), Path(id)).await).await;

        assert_eq!(update_status, StatusCode::NOT_FOUND);
        assert_eq!(delete_status, StatusCode::NOT_FOUND);
    }
}
