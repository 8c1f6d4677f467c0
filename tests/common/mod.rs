//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use box_booking::config::ServiceConfig;
use box_booking::{HttpServer, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Start a server on an ephemeral port. Trigger the returned `Shutdown` to stop it.
#[allow(dead_code)]
pub async fn start_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Router for in-process requests.
#[allow(dead_code)]
pub fn router() -> Router {
    HttpServer::new(ServiceConfig::default()).router()
}

/// Send one request through the router.
#[allow(dead_code)]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_text(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(res: Response) -> Value {
    serde_json::from_str(&body_text(res).await).unwrap()
}
