use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of an uploaded image, kept as upload metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileHash(String);

impl FileHash {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading twelve hex characters, enough to tell uploads apart in logs.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl std::fmt::Display for FileHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let hash = FileHash::from_bytes(b"hello world");
        assert_eq!(
            hash.as_str(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_short_prefix() {
        let hash = FileHash::from_bytes(b"prescription");
        assert_eq!(hash.short().len(), 12);
        assert!(hash.as_str().starts_with(hash.short()));
    }

    #[test]
    fn test_same_bytes_same_digest() {
        assert_eq!(FileHash::from_bytes(b"rx"), FileHash::from_bytes(b"rx"));
        assert_ne!(FileHash::from_bytes(b"rx"), FileHash::from_bytes(b"ry"));
    }
}
