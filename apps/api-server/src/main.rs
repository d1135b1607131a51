//! # Posts API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod seed;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        environment = %config.environment,
        "Starting Posts API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;

    // The server only binds once seeding has finished.
    if config.seeding_enabled() {
        seed::seed_posts(state.posts.as_ref())
            .await
            .context("failed to seed sample data")?;
    } else {
        tracing::info!(environment = %config.environment, "Sample data seeding disabled");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
