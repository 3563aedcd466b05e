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
        career::Career,
        domain_traits::{ContentKind, create_content, delete_content, list_content, update_content},
    },
    dto::{
        requests::career::career_request::CareerRequest,
        responses::{delete_response::DeleteResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::{CurrentUser, ServerState},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/admin/careers",
    tag = "admin",
    responses(
        (status = 200, description = "All positions, newest first", body = Vec<Career>),
        (status = 401, description = "Not signed in", body = CodeErrorResp)
    )
)]
pub async fn admin_list_careers(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let careers: Vec<Career> = list_content(state.store(), &Career::default_query())
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(careers, (), start))
}

#[utoipa::path(
    post,
    path = "/api/admin/careers",
    tag = "admin",
    request_body = CareerRequest,
    responses(
        (status = 201, description = "Position created", body = Career),
        (status = 400, description = "Invalid position", body = CodeErrorResp)
    )
)]
pub async fn admin_create_career(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CareerRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let career: Career = create_content(state.store(), &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_INSERTION_ERROR, e))?;

    info!(career_id = %career.id, admin_id = %admin.admin_id, "Career created");

    Ok((StatusCode::CREATED, http_resp(career, (), start)))
}

#[utoipa::path(
    put,
    path = "/api/admin/careers/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Career id")),
    request_body = CareerRequest,
    responses(
        (status = 200, description = "Position updated", body = Career),
        (status = 400, description = "Invalid position", body = CodeErrorResp),
        (status = 404, description = "No such position", body = CodeErrorResp)
    )
)]
pub async fn admin_update_career(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CareerRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let draft = request.into_draft()?;
    let career: Career = update_content(state.store(), id, &draft)
        .await
        .map_err(|e| store_err(CodeError::DB_UPDATE_ERROR, e))?;

    info!(career_id = %id, admin_id = %admin.admin_id, "Career updated");

    Ok(http_resp(career, (), start))
}

#[utoipa::path(
    delete,
    path = "/api/admin/careers/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Career id")),
    responses(
        (status = 200, description = "Position deleted", body = DeleteResponse),
        (status = 404, description = "No such position", body = CodeErrorResp)
    )
)]
pub async fn admin_delete_career(
    Extension(admin): Extension<CurrentUser>,
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    delete_content::<Career>(state.store(), id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    info!(deleted_career_id = %id, admin_id = %admin.admin_id, "Career deleted");

    Ok(http_resp(DeleteResponse { deleted_id: id }, (), start))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handlers::test_support::{admin, memory_state, read_json};

    fn request(title: &str, employment_type: Option<&str>) -> CareerRequest {
        serde_json::from_value(json!({
            "title": title,
            "department": "Engineering",
            "location": "Seoul",
            "description": "Build XR experiences",
            "requirements": "Unity or Unreal",
            "employment_type": employment_type,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_update_delete_round_trip() {
        let state = memory_state();

        let (status, created) = read_json(
            admin_create_career(Extension(admin()), State(state.clone()), Json(request("XR Engineer", None)))
                .await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["employment_type"], "Full-time");
        let id: Uuid = serde_json::from_value(created["data"]["id"].clone()).unwrap();

        let (status, updated) = read_json(
            admin_update_career(
                Extension(admin()),
                State(state.clone()),
                Path(id),
                Json(request("Senior XR Engineer", Some("Contract"))),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["title"], "Senior XR Engineer");
        assert_eq!(updated["data"]["employment_type"], "Contract");

        let (status, _) =
            read_json(admin_delete_career(Extension(admin()), State(state.clone()), Path(id)).await).await;
        assert_eq!(status, StatusCode::OK);

        let (_, listed) = read_json(admin_list_careers(State(state)).await).await;
        assert_eq!(listed["data"], json!([]));
    }

    #[tokio::test]
    async fn missing_career_is_a_404() {
        let state = memory_state();

        let (update_status, _) = read_json(
            admin_update_career(
                Extension(admin()),
                State(state.clone()),
                Path(Uuid::new_v4()),
                Json(request("Ghost", None)),
            )
            .await,
        )
        .await;
        let (delete_status, _) = read_json(
            admin_delete_career(Extension(admin()), State(state), Path(Uuid::new_v4())).await,
        )
        .await;

        assert_eq!(update_status, StatusCode::NOT_FOUND);
        assert_eq!(delete_status, StatusCode::NOT_FOUND);
    }
}
