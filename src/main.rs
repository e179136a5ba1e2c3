//! Goatboard server entrypoint.
//!
//! Wires configuration, the PostgreSQL pool, the CSV item catalog, and the
//! HTTP router together, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use goatboard::adapters::catalog::CsvItemCatalog;
use goatboard::adapters::http::{api_router, PoolHandlers, RankingHandlers};
use goatboard::adapters::postgres::{
    PostgresCustomPoolStore, PostgresSessionStore, PostgresVoteLog,
};
use goatboard::application::handlers::pool::{CreateCustomPoolHandler, GetCustomPoolHandler};
use goatboard::application::handlers::ranking::{
    FinalizeSessionHandler, GetSessionHandler, GetSharedSessionHandler, StartSessionHandler,
    SubmitVoteHandler,
};
use goatboard::config::AppConfig;
use goatboard::ports::{CustomPoolStore, ItemCatalog, SessionStore, VoteLog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pg = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pg).await?;
    }

    let catalog: Arc<dyn ItemCatalog> = Arc::new(CsvItemCatalog::load(&config.catalog.csv_path)?);
    let session_store: Arc<dyn SessionStore> = Arc::new(PostgresSessionStore::new(pg.clone()));
    let vote_log: Arc<dyn VoteLog> = Arc::new(PostgresVoteLog::new(pg.clone()));
    let pool_store: Arc<dyn CustomPoolStore> = Arc::new(PostgresCustomPoolStore::new(pg));

    let ranking_handlers = RankingHandlers::new(
        Arc::new(StartSessionHandler::new(
            session_store.clone(),
            pool_store.clone(),
            catalog.clone(),
        )),
        Arc::new(SubmitVoteHandler::new(
            session_store.clone(),
            vote_log.clone(),
            catalog.clone(),
        )),
        Arc::new(GetSessionHandler::new(
            session_store.clone(),
            vote_log.clone(),
            catalog.clone(),
        )),
        Arc::new(FinalizeSessionHandler::new(
            session_store.clone(),
            vote_log.clone(),
            catalog.clone(),
        )),
        Arc::new(GetSharedSessionHandler::new(
            session_store,
            vote_log,
            catalog.clone(),
        )),
        config.sharing.clone(),
    );

    let pool_handlers = PoolHandlers::new(
        Arc::new(CreateCustomPoolHandler::new(
            pool_store.clone(),
            catalog.clone(),
        )),
        Arc::new(GetCustomPoolHandler::new(pool_store, catalog)),
    );

    let app = api_router(ranking_handlers, pool_handlers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "goatboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
