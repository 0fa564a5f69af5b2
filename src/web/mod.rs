mod handlers;
mod page_view;
mod run_query;
mod state;

use axum::Router;
use axum::routing::get;
use handlers::{DOWNLOAD_PATH, download_csv, health, page};
use std::io;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page))
        .route(DOWNLOAD_PATH, get(download_csv))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(address: SocketAddr, state: AppState) -> Result<(), WebError> {
    let listener = TcpListener::bind(address).await.map_err(|e| WebError::Bind { source: e, address })?;
    info!("🌐 Listening on http://{}/", address);

    axum::serve(listener, router(state)).await.map_err(WebError::Serve)
}

#[derive(Error, Debug)]
pub enum WebError {
    #[error("invalid page template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("unable to bind to {address}: {source}")]
    Bind { source: io::Error, address: SocketAddr },
    #[error("server error: {0}")]
    Serve(io::Error),
}
