// File: services/rendezvous_backend/src/main.rs
use rendezvous_common::{config_error, init_from_config, internal_error, RendezvousError};
use rendezvous_config::{load_config, AppConfig};
use rendezvous_db::{
    DbClient, MemoryScheduleRepository, RepositoryFactory, ScheduleRepository,
    ScheduleRepositoryFactory, SqlScheduleRepository,
};
use rendezvous_scheduler::SchedulerService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

mod app;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // The subscriber may not be installed yet when configuration fails.
        eprintln!("Rendezvous stopped: {}", err);
        error!("Rendezvous stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RendezvousError> {
    let config = load_config().map_err(config_error)?;
    init_from_config(&config.logging);

    let repositories = ScheduleRepositoryFactory::new();
    if let Some(db_config) = &config.database {
        let db_client = DbClient::from_config(db_config).await?;
        info!("Using SQL store at {}", db_client);
        let store: SqlScheduleRepository = repositories.create_repository(db_client);
        serve(&config, store).await
    } else {
        warn!("No database configured, schedule data lives in memory only");
        let store: MemoryScheduleRepository = repositories.create_repository(());
        serve(&config, store).await
    }
}

async fn serve<S>(config: &AppConfig, store: S) -> Result<(), RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    store.init_schema().await?;
    info!(
        "Scheduling with conflict policy {:?} and occupancy rule {:?}",
        config.scheduling.conflict_policy, config.scheduling.occupancy_rule
    );

    let service = Arc::new(SchedulerService::new(store, config.scheduling));
    let app = app::build_app(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(internal_error)
}
