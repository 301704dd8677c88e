pub mod stored_upload;

pub use stored_upload::StoredUpload;
