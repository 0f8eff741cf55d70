// catalog_server/src/main.rs

use actix_web::{App, HttpServer};
use catalog_server::config::{AppConfig, LogFormat};
use catalog_server::state::AppState;
use catalog_server::telemetry::init_tracing;
use catalog_server::web::configure_app;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
  let config = AppConfig::from_env();
  let log_format = config.as_ref().map(|c| c.log_format).unwrap_or(LogFormat::Pretty);
  init_tracing(log_format).map_err(io::Error::other)?;

  let config = config.map_err(|e| {
    tracing::error!(error = %e, "Failed to load application configuration.");
    io::Error::other(e)
  })?;
  tracing::info!(?config, "Starting product catalog server...");

  let server_address = config.bind_address();
  let app_state = AppState::initialize(config).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialize application state.");
    io::Error::other(e)
  })?;

  tracing::info!("Binding server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app(app_state.clone()))
  })
  .bind(&server_address)?
  .run()
  .await
}
