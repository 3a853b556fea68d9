//! # HTTP Server
//!
//! Wires the item routes, CORS, and request logging into one router
//! and serves it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::observability::{Logger, Severity};

use super::routes::{item_routes, AppState};

/// HTTP server for the item mutation API.
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(
            config.db_path.clone(),
            &config.codec_secret,
        ));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, development only
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        item_routes(state)
            .layer(middleware::from_fn(log_requests))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start serving (async).
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        let addr_str = addr.to_string();
        Logger::log(Severity::Info, "server_started", &[("addr", addr_str.as_str())]);

        axum::serve(listener, self.router).await
    }
}

/// One structured log line per request: method, path, status, latency.
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let severity = if status.is_server_error() {
        Severity::Error
    } else if status.is_client_error() {
        Severity::Warn
    } else {
        Severity::Info
    };
    let status_str = status.as_u16().to_string();
    let latency_ms = start.elapsed().as_millis().to_string();
    Logger::log(
        severity,
        "request",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status_str.as_str()),
            ("latency_ms", latency_ms.as_str()),
        ],
    );

    response
}
