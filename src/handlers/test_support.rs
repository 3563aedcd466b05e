use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    domain::auth::admin_user::AdminUser,
    init::state::{CurrentUser, DeploymentEnvironment, ServerState},
    store::{
        StoreClient, StoreError,
        client::{DEFAULT_STORE_TIMEOUT, test_stores::FailingStore},
        memory::MemoryStore,
    },
};

pub fn memory_state() -> Arc<ServerState> {
    state_with(StoreClient::new(
        Arc::new(MemoryStore::new()),
        DEFAULT_STORE_TIMEOUT,
    ))
}

pub fn unavailable_state() -> Arc<ServerState> {
    state_with(StoreClient::new(
        Arc::new(FailingStore(StoreError::Unavailable(
            "connection refused".to_owned(),
        ))),
        DEFAULT_STORE_TIMEOUT,
    ))
}

pub fn state_with(store: StoreClient) -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("lumengaze-be test".to_owned())
            .server_start_time(tokio::time::Instant::now())
            .store(store)
            .deployment_environment(DeploymentEnvironment::Local)
            .build()
            .unwrap(),
    )
}

pub fn admin() -> CurrentUser {
    CurrentUser {
        admin_id: Uuid::new_v4(),
        email: "admin@lumengaze.test".to_owned(),
        name: "Admin".to_owned(),
    }
}

pub fn admin_user() -> AdminUser {
    let current = admin();
    AdminUser {
        id: current.admin_id,
        email: current.email,
        name: current.name,
        password_hash: String::new(),
        created_at: chrono::Utc::now(),
    }
}

/// Status and parsed JSON body of a handler result.
pub async fn read_json(response: impl IntoResponse) -> (StatusCode, serde_json::Value) {
    let response: Response = response.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
