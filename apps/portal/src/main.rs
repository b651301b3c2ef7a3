//! HopeSpring portal composition root.

#![forbid(unsafe_code)]

mod dto;
mod error;
mod handlers;
mod middleware;
mod portal_config;
mod portal_router;
mod portal_services;
mod session;
mod state;

use hopespring_core::AppError;
use tracing::info;

use crate::portal_config::{PortalConfig, init_tracing};
use crate::portal_router::build_router;
use crate::portal_services::{build_app_state, build_session_layer};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = PortalConfig::load()?;
    let app_state = build_app_state(&config)?;
    let session_layer = build_session_layer(config.cookie_secure);
    let app = build_router(app_state, session_layer)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, credentials = config.credentials.len(), "hopespring-portal listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("portal server error: {error}")))
}
