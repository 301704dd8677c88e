use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

static EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{1,10}$").expect("extension pattern is valid"));

/// On-disk name of a stored upload.
///
/// The key is derived from a server-generated id, never from the client's
/// filename. A short alphanumeric extension is carried over so OCR tooling
/// that sniffs by suffix keeps working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn for_upload(upload_id: Uuid, original_name: &str) -> Self {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| EXTENSION_PATTERN.is_match(ext));

        match extension {
            Some(ext) => Self(format!("{}.{}", upload_id, ext.to_ascii_lowercase())),
            None => Self(upload_id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
