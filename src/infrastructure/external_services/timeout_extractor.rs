use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::prescription_extractor::{
    ExtractedPrescription, ExtractionError, ExtractionJob, PrescriptionExtractor,
};

/// Bounds the wrapped extractor. Dropping the inner future on expiry also
/// kills a spawned OCR process (`kill_on_drop`).
pub struct TimeoutExtractor {
    inner: Arc<dyn PrescriptionExtractor>,
    timeout: Duration,
}

impl TimeoutExtractor {
    pub fn new(inner: Arc<dyn PrescriptionExtractor>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl PrescriptionExtractor for TimeoutExtractor {
    async fn extract(
        &self,
        job: &ExtractionJob,
    ) -> Result<ExtractedPrescription, ExtractionError> {
        match tokio::time::timeout(self.timeout, self.inner.extract(job)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    "OCR extraction for upload {} exceeded {:?}",
                    job.upload_id,
                    self.timeout
                );
                Err(ExtractionError::TimedOut(self.timeout))
            }
        }
    }
}
