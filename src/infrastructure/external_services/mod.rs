pub mod ocr_command_extractor;
pub mod timeout_extractor;

pub use ocr_command_extractor::{OcrCommandConfig, OcrCommandExtractor};
pub use timeout_extractor::TimeoutExtractor;
