use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::{domain::auth::admin_user::AdminUser, store::StoreClient};

use super::builder::ServerStateBuilder;
use super::deployment_environment::DeploymentEnvironment;
use super::session::Session;

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) store: StoreClient,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) session_map: scc::HashMap<Uuid, Session>, // read/write
    pub(crate) session_duration: chrono::Duration,
    pub(crate) deployment_environment: DeploymentEnvironment,
}

impl ServerState {
    pub async fn new_session(&self, admin: &AdminUser) -> anyhow::Result<Uuid> {
        let session_id = Uuid::new_v4();
        let now = chrono::Utc::now();
        let expires_at = now + self.session_duration;
        match self
            .session_map
            .insert_async(
                session_id,
                Session {
                    session_id,
                    admin_id: admin.id,
                    admin_email: admin.email.clone(),
                    admin_name: admin.name.clone(),
                    created_at: now,
                    expires_at,
                },
            )
            .await
        {
            Ok(_) => (),
            Err(_) => {
                return Err(anyhow::anyhow!(
                    "Failed to insert session into scc::HashMap; key already exists!"
                ));
            }
        };

        Ok(session_id)
    }

    pub async fn get_session(&self, session_id: &Uuid) -> anyhow::Result<Session> {
        match self
            .session_map
            .read_async(session_id, |_, v| v.clone())
            .await
        {
            Some(session) => Ok(session),
            None => Err(anyhow::anyhow!("Session not found")),
        }
    }

    pub fn get_session_length(&self) -> usize {
        self.session_map.len()
    }

    pub async fn remove_session(&self, session_id: Uuid) -> anyhow::Result<(Uuid, usize)> {
        match self.session_map.remove_async(&session_id).await {
            Some((session_id, _)) => Ok((session_id, self.session_map.len())),
            None => Err(anyhow::anyhow!("Session not found")),
        }
    }

    /// Returns (pruned, remaining).
    pub async fn purge_expired_sessions(&self) -> (usize, usize) {
        let now = chrono::Utc::now();
        let (mut pruned, mut remaining): (usize, usize) = (0, 0);

        self.session_map
            .iter_mut_async(|entry| {
                if entry.expires_at < now {
                    pruned += 1;
                    let _ = entry.consume();
                } else {
                    remaining += 1;
                }
                true
            })
            .await;

        (pruned, remaining)
    }

    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled.load(Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get_deployment_environment(&self) -> DeploymentEnvironment {
        self.deployment_environment
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{client::DEFAULT_STORE_TIMEOUT, memory::MemoryStore};

    fn admin() -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            email: "admin@lumengaze.test".to_owned(),
            name: "Admin".to_owned(),
            password_hash: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    fn state(session_duration: chrono::Duration) -> ServerState {
        ServerState::builder()
            .app_name_version("lumengaze-be test".to_owned())
            .server_start_time(tokio::time::Instant::now())
            .store(StoreClient::new(
                Arc::new(MemoryStore::new()),
                DEFAULT_STORE_TIMEOUT,
            ))
            .session_duration(session_duration)
            .deployment_environment(DeploymentEnvironment::Local)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn sessions_round_trip_and_can_be_removed() {
        let state = state(chrono::Duration::hours(1));
        let admin = admin();

        let id = state.new_session(&admin).await.unwrap();
        let session = state.get_session(&id).await.unwrap();
        assert!(session.is_valid());
        assert_eq!(session.current_user().admin_id, admin.id);

        let (removed, left) = state.remove_session(id).await.unwrap();
        assert_eq!((removed, left), (id, 0));
        assert!(state.get_session(&id).await.is_err());
        assert!(state.remove_session(id).await.is_err());
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let expired = state(chrono::Duration::seconds(-1));
        let live = Arc::new(state(chrono::Duration::hours(1)));
        let admin = admin();

        expired.new_session(&admin).await.unwrap();
        expired.new_session(&admin).await.unwrap();
        assert_eq!(expired.purge_expired_sessions().await, (2, 0));

        live.new_session(&admin).await.unwrap();
        assert_eq!(live.purge_expired_sessions().await, (0, 1));
    }
}
