use std::sync::Arc;

use tracing::info;

use crate::{
    init::state::ServerState,
    jobs::{
        auth::purge_expired_sessions::purge_expired_sessions,
        job_funcs::every_minute::schedule_task_every_minute_at,
    },
};

pub async fn task_init(state: Arc<ServerState>) -> anyhow::Result<()> {
    info!("Task scheduler running...");

    let coroutine_state = Arc::clone(&state);
    tokio::spawn(async move {
        schedule_task_every_minute_at(
            coroutine_state,
            move |coroutine_state: Arc<ServerState>| async move {
                purge_expired_sessions(coroutine_state).await
            },
            String::from("PURGE_EXPIRED_SESSIONS"),
            0, // seconds
            0, // milliseconds
        )
        .await
    });

    Ok(())
}
