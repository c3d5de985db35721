use std::{sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod adapters;
mod app_state;
mod config;
mod domain;
mod router;
mod routes;

use crate::{app_state::AppState, domain::run_activity_log_retention};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();

    let settings = config::read_config().expect("Failed to read configuration");

    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(settings.database.with_db())
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let app_state = AppState::from_pool(pool, &settings);

    tokio::spawn(run_activity_log_retention(
        Arc::clone(&app_state.activity_log_service),
        settings.activity_log.purge_interval(),
    ));

    let app = router::create(app_state, settings.application.app_url.clone());

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
