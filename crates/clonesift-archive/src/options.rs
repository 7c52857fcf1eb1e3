use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clonesift_fs::PermissionMode;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Clone, Default)]
pub struct ExtractOptions {
    pub perm_strategy: PermissionStrategy,
    pub on_progress: Option<Arc<dyn Fn(Progress) + Send + Sync>>,
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("perm_strategy", &self.perm_strategy)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Progress {
    pub bytes_processed: u64,
    pub entries_processed: usize,
    pub total_entries: usize,
    pub current_file: Option<PathBuf>,
}

impl ExtractOptions {
    pub fn permission_strategy(mut self, strategy: PermissionStrategy) -> Self {
        self.perm_strategy = strategy;
        self
    }

    pub fn on_progress(mut self, callback: Arc<dyn Fn(Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

/// How declared entry mode bits are applied to extracted files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStrategy {
    /// Apply the archive's mode bits as-is.
    #[default]
    Preserve,
    /// Apply the archive's mode bits, always granting owner read/write.
    Standard,
    /// Leave the umask default.
    Ignore,
}

impl PermissionStrategy {
    /// Resolve the mode to apply (pure).
    pub fn resolve(self, mode: Option<u32>) -> PermissionMode {
        match (self, mode) {
            (Self::Ignore, _) | (_, None) => PermissionMode::Inherit,
            (Self::Preserve, Some(m)) => PermissionMode::Custom(m),
            (Self::Standard, Some(m)) => PermissionMode::Custom(m | 0o600),
        }
    }

    /// Apply the resolved mode to `path` (impure).
    pub fn apply_to_path(self, path: &Path, mode: Option<u32>) -> Result<()> {
        self.resolve(mode).apply_to_path(path)?;
        Ok(())
    }
}
