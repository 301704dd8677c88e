pub mod file_storage;
pub mod prescription_extractor;

pub use file_storage::FileStorage;
pub use prescription_extractor::PrescriptionExtractor;
