use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError};
use crate::domain::entities::StoredUpload;
use crate::domain::value_objects::{FileHash, StorageKey};

pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(FileStorageError::from)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        data: &[u8],
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<StoredUpload, FileStorageError> {
        let upload_id = Uuid::new_v4();
        let key = StorageKey::for_upload(upload_id, file_name);
        let file_path = self.base_path.join(key.as_str());

        fs::write(&file_path, data).await?;

        Ok(StoredUpload::new(
            upload_id,
            file_name.to_string(),
            file_path,
            data.len() as u64,
            content_type.map(|s| s.to_string()),
            FileHash::from_bytes(data),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_file_writes_bytes_under_generated_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let upload = storage
            .store_file(b"image-bytes", "rx1.png", Some("image/png"))
            .await
            .unwrap();

        assert_eq!(upload.original_name(), "rx1.png");
        assert_eq!(upload.size(), 11);
        assert_eq!(
            upload.stored_path(),
            dir.path().join(format!("{}.png", upload.id()))
        );
        assert_eq!(std::fs::read(upload.stored_path()).unwrap(), b"image-bytes");
    }

    #[tokio::test]
    async fn test_same_name_twice_keeps_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let first = storage.store_file(b"one", "rx1.png", None).await.unwrap();
        let second = storage.store_file(b"two", "rx1.png", None).await.unwrap();

        assert_ne!(first.stored_path(), second.stored_path());
        assert_eq!(std::fs::read(first.stored_path()).unwrap(), b"one");
        assert_eq!(std::fs::read(second.stored_path()).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_traversal_name_stays_inside_base() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let upload = storage
            .store_file(b"x", "../../outside.png", None)
            .await
            .unwrap();

        assert_eq!(upload.stored_path().parent(), Some(dir.path()));
    }

    #[tokio::test]
    async fn test_ensure_directory_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("nested").join("uploads"));

        storage.ensure_directory_exists().await.unwrap();
        storage.ensure_directory_exists().await.unwrap();

        assert!(storage.base_path().is_dir());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("never-created"));

        let result = storage.store_file(b"x", "rx1.png", None).await;

        assert!(matches!(result, Err(FileStorageError::IoError(_))));
    }
}
