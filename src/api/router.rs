//! API router configuration.

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_item, complete_all, create_list, delete_list, edit_list_form, health, index, list_lists,
    new_list_form, remove_item, rename_list, show_list, toggle_item, AppState,
};
use super::session_layer::{session_middleware, DEFAULT_COOKIE_NAME};
use crate::error::TodoError;
use crate::session::DEFAULT_IDLE_TIMEOUT;

/// Create the router with all routes configured.
pub fn create_router() -> Router {
    create_router_with_state(AppState::new())
}

/// Create the router with custom state.
pub fn create_router_with_state(state: AppState) -> Router {
    let list_routes = Router::new()
        .route("/new", get(new_list_form))
        .route("/{id}", get(show_list))
        .route("/{id}/edit", get(edit_list_form).post(rename_list))
        .route("/{id}/delete", post(delete_list))
        .route("/{id}/todos", post(add_item))
        .route("/{id}/todos/{index}", post(toggle_item))
        .route("/{id}/remove/{index}", post(remove_item))
        .route("/{id}/finish", post(complete_all));

    // route_layer: sessions are opened only for matched routes
    Router::new()
        .route("/", get(index))
        .route("/lists", get(list_lists).post(create_list))
        .nest("/lists", list_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Wait for Ctrl-C and drain in-flight requests before exiting.
    pub graceful_shutdown: bool,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Sessions idle for longer than this are evicted.
    pub idle_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
            graceful_shutdown: true,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Start the server.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    let state = AppState::with_settings(&config.cookie_name, config.idle_timeout);
    serve_with_state(config, state).await
}

/// Start the server with custom state.
pub async fn serve_with_state(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let router = create_router_with_state(state);

    tracing::info!("Starting todo-lists server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(TodoError::Io)?;

    let server = axum::serve(listener, router);
    let result = if config.graceful_shutdown {
        server.with_graceful_shutdown(shutdown_signal()).await
    } else {
        server.await
    };

    result.map_err(TodoError::Io)
}
