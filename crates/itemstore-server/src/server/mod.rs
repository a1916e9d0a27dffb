//! HTTP server.
//!
//! Wires the middleware chain and the item CRUD routes. The collaborator
//! contract for the pipeline: tracing middleware runs first (establishes
//! the correlation scope), then request logging, then the handler; both
//! middlewares see every response, including error responses.

mod handlers;
pub mod logging_middleware;
pub mod trace_middleware;

pub use handlers::AppState;
pub use trace_middleware::{TraceConfig, REQUEST_ID_HEADER};

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::get,
    Router,
};
use tracing::info;

use itemstore_core::ItemRepository;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Get the socket address
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

/// Itemstore HTTP server.
///
/// All external dependencies are injected through the constructor, so the
/// server is testable with an in-memory repository.
pub struct AppServer {
    config: ServerConfig,
    trace_config: TraceConfig,
    state: AppState,
}

impl AppServer {
    /// Create a new server with dependency injection
    pub fn new(
        config: ServerConfig,
        trace_config: TraceConfig,
        items: Arc<dyn ItemRepository>,
    ) -> Self {
        Self {
            config,
            trace_config,
            state: AppState { items },
        }
    }

    /// Build the Axum router.
    ///
    /// Layers added later wrap the earlier ones, so the tracing layer is
    /// added last to run outermost.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::greet))
            .route("/health", get(handlers::health))
            .route(
                "/api/v1/items",
                get(handlers::list_items).post(handlers::create_item),
            )
            .route(
                "/api/v1/items/{id}",
                get(handlers::get_item)
                    .put(handlers::update_item)
                    .delete(handlers::delete_item),
            )
            .with_state(self.state.clone())
            .layer(middleware::from_fn(
                logging_middleware::request_logging_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.trace_config.clone(),
                trace_middleware::trace_middleware,
            ))
    }

    /// Run the server until the listener fails or the process stops.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.addr()?;

        info!("[Server] Starting on {}", addr);

        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("[Server] Ready to accept connections");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}
