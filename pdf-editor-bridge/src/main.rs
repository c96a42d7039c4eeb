mod editor_slot;
mod errors;
mod params;
mod services;
mod state;

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use upload_coordinator::{HttpDocumentBackend, TracingSink};
use validator::Validate;

use crate::params::Args;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    args.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let limits = args.upload_limits().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "chunk and request sizes must be positive")
    })?;

    let backend = HttpDocumentBackend::new(&args.backend_url)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?
        .with_read_retries(args.read_retries);
    let backend = Arc::new(backend);

    let state = web::Data::new(AppState::new(
        backend.clone(),
        backend,
        Arc::new(TracingSink::new(args.debug_level)),
        limits,
        args.save_queue,
    ));

    tracing::info!(
        "Serving editor bridge on {} against {} (chunk size {}, single request ceiling {})",
        args.http_addr,
        args.backend_url,
        limits.chunk_size_threshold,
        limits.max_single_request_size
    );

    let app_state = state.clone();
    let max_payload_bytes = args.max_payload_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(max_payload_bytes))
            .configure(services::configure)
    })
    .bind(args.http_addr.clone())?
    .run()
    .await?;

    match Arc::try_unwrap(state.into_inner()) {
        Ok(state) => state.shutdown().await,
        Err(_) => tracing::warn!("application state still shared at exit, save session dropped"),
    }
    Ok(())
}
