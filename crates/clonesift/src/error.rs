use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Extract(#[from] clonesift_archive::Error),

    #[error(transparent)]
    Report(#[from] clonesift_report::Error),

    #[error("invalid order url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("order url is missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("order id '{0}' cannot be used as a directory name")]
    InvalidOrderId(String),

    #[error("request to '{url}' failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("bad response from '{url}': {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("sha256 mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error("i/o error at '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("command not found: {program}")]
    CommandNotFound {
        program: String,
        source: which::Error,
    },

    #[error("command failed: {program}, source: {source}")]
    CommandFailed { program: String, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
