use thiserror::Error;

mod common;
pub mod zip;

pub use common::normalize_entry_path;
pub use self::zip::extract_zip;

/// One non-directory file taken out of an uploaded archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid or corrupt zip archive: {0}")]
    Corrupt(String),
    #[error("unsafe archive entry '{path}': {reason}")]
    UnsafePath { path: String, reason: &'static str },
    #[error("failed to read archive entry '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
