//! HTTP API for articles.
//!
//! ## Endpoints
//!
//! - `GET    /api/v1/articles` - List (filter, sort, fields, page, limit)
//! - `POST   /api/v1/articles` - Create
//! - `GET    /api/v1/articles/{id}` - Fetch one
//! - `PATCH  /api/v1/articles/{id}` - Partial update
//! - `DELETE /api/v1/articles/{id}` - Delete
//! - `GET    /api/v1/articles/views-by-theme` - Views summed per theme
//! - `GET    /api/v1/articles/most-liked` - Top articles by rating

pub mod envelope;
mod error;
pub mod handlers;
mod state;

pub use envelope::{Envelope, Report, Status};
pub use state::AppState;

use std::future::Future;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::Result;

pub const BASE_PATH: &str = "/api/v1/articles";

/// Listener configuration for [`GazetteServer`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Emit a span per HTTP request.
    pub tracing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tracing: true,
        }
    }
}

impl ServerConfig {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// `host:port`, resolved at bind time.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Route table for the article endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            BASE_PATH,
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            &format!("{}/views-by-theme", BASE_PATH),
            get(handlers::views_by_theme),
        )
        .route(
            &format!("{}/most-liked", BASE_PATH),
            get(handlers::most_liked),
        )
        .route(
            &format!("{}/{{id}}", BASE_PATH),
            get(handlers::get_article)
                .patch(handlers::update_article)
                .delete(handlers::delete_article),
        )
}

pub struct GazetteServer {
    config: ServerConfig,
    state: AppState,
}

impl GazetteServer {
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn build_router(&self) -> Router {
        let app = router().with_state(self.state.clone());
        if self.config.tracing {
            app.layer(TraceLayer::new_for_http())
        } else {
            app
        }
    }

    /// Serve until `shutdown` resolves, then release the database handle.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.config.address()).await?;
        info!("App running on {}", listener.local_addr()?);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;

        self.state.close().await
    }
}
