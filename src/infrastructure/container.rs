use std::sync::Arc;

use crate::{
    application::{
        ports::{FileStorage, PrescriptionExtractor},
        use_cases::UploadAndExtractUseCase,
    },
    infrastructure::{
        config::AppConfig,
        external_services::{OcrCommandExtractor, TimeoutExtractor},
        file_system::LocalFileStorage,
    },
    presentation::http::handlers::UploadHandler,
};

pub struct AppContainer {
    // External Services
    pub file_storage: Arc<dyn FileStorage>,
    pub extractor: Arc<dyn PrescriptionExtractor>,

    // Use Cases
    pub upload_and_extract_use_case: Arc<UploadAndExtractUseCase>,

    // HTTP Handlers
    pub upload_handler: Arc<UploadHandler>,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let local_storage = LocalFileStorage::new(config.upload_dir.clone());
        local_storage
            .ensure_directory_exists()
            .await
            .map_err(|e| format!("Failed to create upload directory: {}", e))?;

        let command_extractor = OcrCommandExtractor::new(config.ocr_command_config());
        command_extractor
            .ensure_output_dir()
            .await
            .map_err(|e| format!("Failed to create OCR output directory: {}", e))?;

        let extractor: Arc<dyn PrescriptionExtractor> = Arc::new(TimeoutExtractor::new(
            Arc::new(command_extractor),
            config.ocr_timeout,
        ));

        Ok(Self::with_services(Arc::new(local_storage), extractor))
    }

    /// Wires the use case and handlers around already-built services.
    pub fn with_services(
        file_storage: Arc<dyn FileStorage>,
        extractor: Arc<dyn PrescriptionExtractor>,
    ) -> Self {
        let upload_and_extract_use_case = Arc::new(UploadAndExtractUseCase::new(
            file_storage.clone(),
            extractor.clone(),
        ));

        let upload_handler = Arc::new(UploadHandler::new(upload_and_extract_use_case.clone()));

        Self {
            file_storage,
            extractor,
            upload_and_extract_use_case,
            upload_handler,
        }
    }
}
