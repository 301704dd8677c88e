use async_trait::async_trait;

use crate::domain::entities::StoredUpload;

#[derive(Debug)]
pub enum FileStorageError {
    PermissionDenied(String),
    IoError(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FileStorageError {}

impl From<std::io::Error> for FileStorageError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                FileStorageError::PermissionDenied(error.to_string())
            }
            _ => FileStorageError::IoError(error.to_string()),
        }
    }
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists an upload under a server-generated key. `file_name` is
    /// recorded as metadata on the returned entity.
    async fn store_file(
        &self,
        data: &[u8],
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<StoredUpload, FileStorageError>;
}
