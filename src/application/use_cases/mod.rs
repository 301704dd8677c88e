pub mod upload_and_extract;

pub use upload_and_extract::UploadAndExtractUseCase;
