use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::UploadHandler,
    routes::{health_routes, upload_routes},
};

pub struct HttpServer {
    upload_handler: Arc<UploadHandler>,
    addr: SocketAddr,
    max_upload_bytes: usize,
}

impl HttpServer {
    pub fn new(
        upload_handler: Arc<UploadHandler>,
        addr: SocketAddr,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            upload_handler,
            addr,
            max_upload_bytes,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.upload_handler.clone(), self.max_upload_bytes)
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Server listening on {}", self.addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

pub fn build_router(upload_handler: Arc<UploadHandler>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .on_request(
            |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                tracing::info!("Received request: {} {}", request.method(), request.uri());
            },
        )
        .on_response(
            |response: &axum::http::Response<axum::body::Body>,
             latency: std::time::Duration,
             _span: &tracing::Span| {
                tracing::info!(
                    "Response: {} (took {} ms)",
                    response.status(),
                    latency.as_millis()
                );
            },
        )
        .on_failure(
            |error: ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                tracing::error!(
                    "Request failed: {:?} (took {} ms)",
                    error,
                    latency.as_millis()
                );
            },
        );

    Router::new()
        .merge(health_routes())
        .merge(upload_routes(upload_handler))
        // Overruns surface as a 413 multipart error with a JSON body.
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(trace)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
