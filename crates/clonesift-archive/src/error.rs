use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("archive is corrupted: {source}")]
    Corrupted {
        #[source]
        source: zip::result::ZipError,
    },

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: String, resolved: PathBuf },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Permission(#[from] clonesift_fs::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(source: zip::result::ZipError) -> Self {
        Self::Corrupted { source }
    }
}

impl Error {
    /// Whether this error came from a hostile entry name rather than I/O.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::ZipSlip { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
