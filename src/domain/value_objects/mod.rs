pub mod file_hash;
pub mod storage_key;

pub use file_hash::FileHash;
pub use storage_key::StorageKey;
