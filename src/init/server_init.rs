use std::{net::SocketAddr, sync::Arc};

use anyhow::anyhow;
use tracing::{info, level_filters::LevelFilter};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::{
    domain::auth::admin_user::bootstrap_admin,
    jobs::job_funcs::init_scheduler::task_init,
    routers::main_router::build_router,
    store::{Store, StoreClient, memory::MemoryStore, postgres::PgStore},
};

use super::{
    config::{AppConfig, DbConfig, StoreBackend},
    state::{DeploymentEnvironment, ServerState},
};

/// Sets up the global subscriber. When `log_dir` is set, lines go to a daily
/// rolling file instead of stdout; the returned guard flushes it on drop.
fn init_tracing(config: &AppConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let level = config
        .log_level
        .parse::<LevelFilter>()
        .map_err(|e| anyhow!("Invalid LOG_LEVEL {:?}: {e}", config.log_level))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "lumengaze-be.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(config.log_dir.is_none())
        .with_writer(writer);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(guard)
}

async fn init_store(config: &AppConfig) -> anyhow::Result<StoreClient> {
    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let num_cores = num_cpus::get_physical() as u32;
            let pg = PgStore::connect(DbConfig::from_env()?.to_url(), num_cores).await?;
            info!(version = %pg.server_version().await?, "Connected to PostgreSQL");
            Arc::new(pg)
        }
        StoreBackend::Memory => {
            info!("Using the in-memory store; content is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(StoreClient::new(store, config.store_timeout))
}

pub async fn server_init_proc(start: tokio::time::Instant) -> anyhow::Result<()> {
    if std::env::var("IS_CONTAINER").is_err() {
        // A missing .env is fine locally; the real environment still applies.
        let _ = dotenvy::dotenv();
    }

    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(&config)?;

    info!("Initializing server...");

    let store = init_store(&config).await?;

    if let Some((email, password)) = &config.admin_bootstrap {
        bootstrap_admin(&store, email, password.clone()).await?;
    }

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .server_start_time(start)
            .store(store)
            .session_duration(config.session_duration)
            .deployment_environment(DeploymentEnvironment::from_env())
            .build()?,
    );

    task_init(Arc::clone(&state)).await?;

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        environment = ?state.get_deployment_environment(),
        built_at = env!("BUILD_TIME"),
        axum = env!("AXUM_VERSION"),
        rustc = env!("RUSTC_VERSION"),
        startup = ?start.elapsed(),
        "Backend server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "Could not listen for shutdown signal");
        }
        info!("Shutdown signal received; draining connections");
    })
    .await?;

    Ok(())
}
