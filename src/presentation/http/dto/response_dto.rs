use serde::Serialize;

use crate::application::use_cases::upload_and_extract::UploadAndExtractResponse;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded and processed successfully";

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub message: String,
    /// Raw OCR output text. Clients parse it themselves.
    pub data: String,
}

impl From<UploadAndExtractResponse> for UploadResponseDto {
    fn from(response: UploadAndExtractResponse) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            data: response.extracted_data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}
