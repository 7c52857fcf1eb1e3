use std::io;
use std::path::PathBuf;

use crate::emit::Artifact;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid filename grammar '{pattern}': {reason}")]
    Grammar { pattern: String, reason: String },

    #[error("failed to create report directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {artifact} report: {source}")]
    Write {
        artifact: Artifact,
        #[source]
        source: clonesift_fs::Error,
    },

    #[error("failed to serialize gene summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to scan read directory: {0}")]
    Scan(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
