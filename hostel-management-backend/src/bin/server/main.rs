use std::sync::Arc;

use hostel_management_backend::error::AppError;
use hostel_management_backend::run;
use hostel_management_config::get_config;
use hostel_management_database::{get_database_connection, PgStore};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// RUST_LOG=tower_http::trace=TRACE cargo run --bin server

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = get_config()?;
    let pool = get_database_connection(&config.database_url)?;
    let store = Arc::new(PgStore::new(pool));
    run(config, store).await
}
