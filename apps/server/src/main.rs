//! Server entry point: load config, connect PostgreSQL (migrations run on
//! connect), serve.

use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;
use veggie_db::{Database, DbConfig};
use veggie_server::config::AppConfig;
use veggie_server::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let mut db_config = DbConfig::new(&config.database_url);
    db_config.max_connections = config.db_max_connections;
    let db = match Database::connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "database startup failed");
            std::process::exit(1);
        }
    };

    let state = match AppState::new(db, config.clone()) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };
    let data = web::Data::new(state);

    tracing::info!(host = %config.http_host, port = config.http_port, "starting server");

    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes::configure))
        .bind((config.http_host.as_str(), config.http_port))?
        .run()
        .await
}
