mod applications;
mod config;
mod errors;
mod google;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::applications::service::SubmissionService;
use crate::config::Config;
use crate::google::auth::TokenProvider;
use crate::google::drive::GoogleDriveClient;
use crate::google::sheets::GoogleSheetsClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; only a malformed PORT stops startup
    let config = Arc::new(Config::from_env()?);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting careers API v{}", env!("CARGO_PKG_VERSION"));

    match &config.sheet_id {
        Some(sheet_id) => info!(
            "Recording applications to sheet {sheet_id}, worksheet '{}'",
            config.worksheet_name
        ),
        None => warn!("GOOGLE_SHEET_ID is not set; submissions will fail until it is configured"),
    }
    match &config.drive_folder_id {
        Some(folder) => info!("Uploading resumes into Drive folder {folder}"),
        None => info!("Uploading resumes to the service account's Drive root"),
    }

    // One HTTP client and one token cache shared by both Google APIs.
    // No request timeout: a slow Google call holds only its own submission.
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let tokens = Arc::new(TokenProvider::new(
        http.clone(),
        config.service_account_file.clone(),
    ));
    info!(
        "Service account credentials: {}",
        config.service_account_file.display()
    );

    let applications = Arc::new(SubmissionService::new(
        Arc::new(GoogleDriveClient::new(http.clone(), tokens.clone())),
        Arc::new(GoogleSheetsClient::new(http, tokens)),
        config.clone(),
    ));

    let state = AppState {
        config: config.clone(),
        applications,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST and PORT must form a valid socket address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
