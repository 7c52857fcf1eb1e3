//! Filesystem primitives shared by the clonesift crates.
//!
//! - `atomic_write.rs` - temp-file-and-rename writes for report artifacts
//! - `permissions.rs` - mode bits applied to extracted files

mod atomic_write;
mod error;
mod permissions;

pub use atomic_write::{AtomicWriteOptions, atomic_write};
pub use error::{Error, Result};
pub use permissions::PermissionMode;
