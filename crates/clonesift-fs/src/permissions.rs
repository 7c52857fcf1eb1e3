use std::path::Path;

use crate::{Error, Result};

/// File permission modes applied after a file has been written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionMode {
    /// Leave whatever the process umask produced.
    #[default]
    Inherit,

    /// `0o644` on Unix, writable on Windows.
    ReadWrite,

    /// Explicit Unix mode bits.
    ///
    /// On Windows only the write bits matter: no write bit maps to `readonly`.
    Custom(u32),
}

impl PermissionMode {
    /// Apply the mode to an existing path.
    pub fn apply_to_path(self, path: &Path) -> Result<()> {
        let mode = match self.to_unix_mode() {
            Some(mode) => mode,
            None => return Ok(()),
        };

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
                Error::Permissions {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }

        #[cfg(not(unix))]
        {
            let mut perms = std::fs::metadata(path)
                .map_err(|e| Error::Permissions {
                    path: path.to_path_buf(),
                    source: e,
                })?
                .permissions();
            perms.set_readonly(mode & 0o222 == 0);
            std::fs::set_permissions(path, perms).map_err(|e| Error::Permissions {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        Ok(())
    }

    /// Mode bits this variant resolves to, `None` for `Inherit`.
    pub fn to_unix_mode(self) -> Option<u32> {
        match self {
            Self::Inherit => None,
            Self::ReadWrite => Some(0o644),
            Self::Custom(mode) => Some(mode & 0o7777),
        }
    }
}
