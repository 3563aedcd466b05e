use std::sync::atomic::AtomicU64;

use crate::store::StoreClient;

use super::deployment_environment::DeploymentEnvironment;
use super::server_state::ServerState;
use super::session::DEFAULT_SESSION_DURATION;

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    store: Option<StoreClient>,
    session_duration: Option<chrono::Duration>,
    deployment_environment: Option<DeploymentEnvironment>,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn store(mut self, store: StoreClient) -> Self {
        self.store = Some(store);
        self
    }

    pub fn session_duration(mut self, session_duration: chrono::Duration) -> Self {
        self.session_duration = Some(session_duration);
        self
    }

    pub fn deployment_environment(mut self, deployment_environment: DeploymentEnvironment) -> Self {
        self.deployment_environment = Some(deployment_environment);
        self
    }

    pub fn build(self) -> anyhow::Result<ServerState> {
        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            store: self
                .store
                .ok_or_else(|| anyhow::anyhow!("store is required"))?,
            responses_handled: AtomicU64::new(0u64),
            session_map: scc::HashMap::new(),
            session_duration: self.session_duration.unwrap_or(DEFAULT_SESSION_DURATION),
            deployment_environment: self
                .deployment_environment
                .unwrap_or_else(DeploymentEnvironment::from_env),
        })
    }
}
