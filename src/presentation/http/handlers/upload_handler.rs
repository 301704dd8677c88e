use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    UploadAndExtractUseCase, upload_and_extract::UploadAndExtractRequest,
};
use crate::presentation::http::dto::UploadResponseDto;
use crate::presentation::http::errors::AppError;

pub const FILE_FIELD: &str = "file";

pub struct UploadHandler {
    upload_and_extract_use_case: Arc<UploadAndExtractUseCase>,
}

impl UploadHandler {
    pub fn new(upload_and_extract_use_case: Arc<UploadAndExtractUseCase>) -> Self {
        Self {
            upload_and_extract_use_case,
        }
    }

    pub async fn upload_file(
        State(handler): State<Arc<UploadHandler>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<impl IntoResponse, AppError> {
        let mut multipart = multipart.map_err(|rejection| {
            tracing::debug!("Upload is not a multipart request: {}", rejection);
            AppError::MissingFilePart
        })?;

        let request = Self::read_file_part(&mut multipart)
            .await?
            .ok_or(AppError::MissingFilePart)?;

        let response = handler.upload_and_extract_use_case.execute(request).await?;

        Ok((StatusCode::OK, Json(UploadResponseDto::from(response))))
    }

    /// Returns the first `file` part that carries a filename, skipping every
    /// other part.
    async fn read_file_part(
        multipart: &mut Multipart,
    ) -> Result<Option<UploadAndExtractRequest>, AppError> {
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::InvalidMultipart(
                e.status(),
                format!("Failed to process form: {}", e.body_text()),
            )
        })? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            // A `file` part without a filename is a plain form value, not an upload.
            let Some(file_name) = field.file_name().map(|name| name.to_string()) else {
                continue;
            };

            let content_type = field.content_type().map(|ct| ct.to_string());

            let data = field.bytes().await.map_err(|e| {
                AppError::InvalidMultipart(
                    e.status(),
                    format!("Failed to read file data: {}", e.body_text()),
                )
            })?;

            return Ok(Some(UploadAndExtractRequest {
                file_name,
                file_data: data.to_vec(),
                content_type,
            }));
        }

        Ok(None)
    }
}
