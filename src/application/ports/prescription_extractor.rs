use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug)]
pub enum ExtractionError {
    /// The OCR routine itself reported a failure. Carries its message as-is.
    Failed(String),
    IoError(String),
    TimedOut(Duration),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::Failed(msg) => write!(f, "{}", msg),
            ExtractionError::IoError(msg) => write!(f, "{}", msg),
            ExtractionError::TimedOut(limit) => {
                write!(f, "OCR extraction timed out after {:?}", limit)
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub upload_id: Uuid,
    pub image_path: PathBuf,
}

/// Result text exactly as the OCR routine produced it.
#[derive(Debug, Clone)]
pub struct ExtractedPrescription {
    pub raw_json: String,
}

#[async_trait]
pub trait PrescriptionExtractor: Send + Sync {
    async fn extract(
        &self,
        job: &ExtractionJob,
    ) -> Result<ExtractedPrescription, ExtractionError>;
}
