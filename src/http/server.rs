//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, limits, timeout, metrics)
//! - Bind server to listener
//! - Stop gracefully on shutdown broadcast or OS signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderName,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::booking::BookingStore;
use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BookingStore>,
}

/// HTTP server for the booking service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    store: Arc<BookingStore>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let store = Arc::new(BookingStore::with_boxes(config.store.boxes.iter().cloned()));
        let state = AppState {
            store: store.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route(
                "/bookings",
                get(handlers::list_bookings).post(handlers::create_booking),
            )
            .route(
                "/bookings/{id}",
                get(handlers::get_booking)
                    .patch(handlers::update_booking)
                    .delete(handlers::delete_booking),
            )
            .route("/boxes/{box_id}/schedule", get(handlers::box_schedule))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .method_not_allowed_fallback(handlers::not_found)
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            boxes = self.config.store.boxes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!(bookings = self.store.len(), "HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The store backing this server.
    pub fn store(&self) -> Arc<BookingStore> {
        self.store.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
