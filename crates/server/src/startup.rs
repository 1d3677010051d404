use std::sync::Arc;

use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::customer::{CustomerService, InMemoryCustomerStore, SeaOrmCustomerRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect and migrate the database, seed the in-memory store, and wire both
/// stores into the router state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("database migrations applied");

    let memory_customers = InMemoryCustomerStore::seeded(cfg.seed.customers).await?;
    let repo = SeaOrmCustomerRepository { db };
    let db_customers = Arc::new(CustomerService::new(Arc::new(repo)));

    Ok(ServerState { memory_customers, db_customers })
}

/// Public entry: build the app and run the HTTP server until it fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors());

    let addr = cfg.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "customer api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
