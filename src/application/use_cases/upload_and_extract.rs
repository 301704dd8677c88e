use serde::de::IgnoredAny;
use std::sync::Arc;

use crate::application::ports::prescription_extractor::{ExtractionError, ExtractionJob};
use crate::application::ports::{FileStorage, PrescriptionExtractor};
use crate::domain::entities::StoredUpload;

#[derive(Debug)]
pub enum UploadAndExtractError {
    NoFileSelected,
    StorageError(String),
    ProcessingFailed(String),
    ExtractionTimedOut(String),
}

impl std::fmt::Display for UploadAndExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadAndExtractError::NoFileSelected => write!(f, "No selected file"),
            UploadAndExtractError::StorageError(msg) => write!(f, "{}", msg),
            UploadAndExtractError::ProcessingFailed(msg) => write!(f, "{}", msg),
            UploadAndExtractError::ExtractionTimedOut(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for UploadAndExtractError {}

impl From<ExtractionError> for UploadAndExtractError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::TimedOut(_) => {
                UploadAndExtractError::ExtractionTimedOut(error.to_string())
            }
            other => UploadAndExtractError::ProcessingFailed(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadAndExtractRequest {
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadAndExtractResponse {
    pub upload: StoredUpload,
    /// OCR output, verbatim.
    pub extracted_data: String,
}

pub struct UploadAndExtractUseCase {
    file_storage: Arc<dyn FileStorage>,
    extractor: Arc<dyn PrescriptionExtractor>,
}

impl UploadAndExtractUseCase {
    pub fn new(
        file_storage: Arc<dyn FileStorage>,
        extractor: Arc<dyn PrescriptionExtractor>,
    ) -> Self {
        Self {
            file_storage,
            extractor,
        }
    }

    pub async fn execute(
        &self,
        request: UploadAndExtractRequest,
    ) -> Result<UploadAndExtractResponse, UploadAndExtractError> {
        if request.file_name.is_empty() {
            return Err(UploadAndExtractError::NoFileSelected);
        }

        let upload = self
            .file_storage
            .store_file(
                &request.file_data,
                &request.file_name,
                request.content_type.as_deref(),
            )
            .await
            .map_err(|e| UploadAndExtractError::StorageError(e.to_string()))?;

        tracing::info!("Stored upload {}", upload);

        let job = ExtractionJob {
            upload_id: upload.id(),
            image_path: upload.stored_path().to_path_buf(),
        };

        let extracted = self.extractor.extract(&job).await.map_err(|e| {
            tracing::warn!("Extraction failed for upload {}: {}", upload.id(), e);
            UploadAndExtractError::from(e)
        })?;

        // Forwarded as text, but callers parse it, so reject anything that is not JSON.
        serde_json::from_str::<IgnoredAny>(&extracted.raw_json).map_err(|e| {
            tracing::warn!("OCR output for upload {} is not JSON: {}", upload.id(), e);
            UploadAndExtractError::ProcessingFailed(format!("OCR output is not valid JSON: {}", e))
        })?;

        tracing::info!(
            "Extracted {} bytes of prescription data from upload {}",
            extracted.raw_json.len(),
            upload.id()
        );

        Ok(UploadAndExtractResponse {
            upload,
            extracted_data: extracted.raw_json,
        })
    }
}
