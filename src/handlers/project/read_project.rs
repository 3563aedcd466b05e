use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    domain::{
        domain_traits::get_content,
        project::{Project, ProjectWithScreenshots, list_project_screenshots},
    },
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    handlers::degrade::empty_on_error,
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project with its ordered screenshots", body = ProjectWithScreenshots),
        (status = 404, description = "No such project", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn read_project(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let project = get_content::<Project>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| code_err(CodeError::PROJECT_NOT_FOUND, format!("no project {id}")))?;

    let screenshots = empty_on_error(
        list_project_screenshots(state.store(), id).await,
        "project_screenshots",
    );

    Ok(http_resp(
        ProjectWithScreenshots {
            project,
            screenshots,
        },
        (),
        start,
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::handlers::test_support::{memory_state, read_json};

    #[tokio::test]
    async fn missing_project_is_a_404() {
        let (status, body) = read_json(read_project(State(memory_state()), Path(Uuid::new_v4())).await).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], 32);
    }
}
