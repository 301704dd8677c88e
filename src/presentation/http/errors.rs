use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::use_cases::upload_and_extract::UploadAndExtractError;

pub const NO_FILE_PART: &str = "No file part";
pub const NO_SELECTED_FILE: &str = "No selected file";

#[derive(Debug)]
pub enum AppError {
    MissingFilePart,
    NoFileSelected,
    InvalidMultipart(StatusCode, String),
    ProcessingFailed(String),
    ExtractionTimedOut(String),
}

impl From<UploadAndExtractError> for AppError {
    fn from(error: UploadAndExtractError) -> Self {
        match error {
            UploadAndExtractError::NoFileSelected => AppError::NoFileSelected,
            UploadAndExtractError::StorageError(msg) => AppError::ProcessingFailed(msg),
            UploadAndExtractError::ProcessingFailed(msg) => AppError::ProcessingFailed(msg),
            UploadAndExtractError::ExtractionTimedOut(msg) => AppError::ExtractionTimedOut(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingFilePart => (StatusCode::BAD_REQUEST, NO_FILE_PART.to_string()),
            AppError::NoFileSelected => (StatusCode::BAD_REQUEST, NO_SELECTED_FILE.to_string()),
            AppError::InvalidMultipart(status, msg) => (status, msg),
            AppError::ProcessingFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::ExtractionTimedOut(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
