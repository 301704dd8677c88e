use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::UploadHandler;

pub fn upload_routes(upload_handler: Arc<UploadHandler>) -> Router {
    Router::new()
        .route("/upload", post(UploadHandler::upload_file))
        .with_state(upload_handler)
}
