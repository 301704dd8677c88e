use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::value_objects::FileHash;

/// A prescription image persisted to the upload directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    id: Uuid,
    original_name: String,
    stored_path: PathBuf,
    size: u64,
    content_type: Option<String>,
    file_hash: FileHash,
    created_at: DateTime<Utc>,
}

impl StoredUpload {
    pub fn new(
        id: Uuid,
        original_name: String,
        stored_path: PathBuf,
        size: u64,
        content_type: Option<String>,
        file_hash: FileHash,
    ) -> Self {
        Self {
            id,
            original_name,
            stored_path,
            size,
            content_type,
            file_hash,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Filename as supplied by the client. Metadata only, never used as a path.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn stored_path(&self) -> &Path {
        &self.stored_path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn file_hash(&self) -> &FileHash {
        &self.file_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl std::fmt::Display for StoredUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}, {} bytes, sha256 {}) at {}",
            self.id,
            self.original_name,
            self.content_type.as_deref().unwrap_or("unknown type"),
            self.size,
            self.file_hash.short(),
            self.created_at.to_rfc3339()
        )
    }
}
