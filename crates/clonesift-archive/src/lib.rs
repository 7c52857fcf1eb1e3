//! Archive extraction with path sanitization and filename recovery.
//!
//! # Architecture
//!
//! - `codec.rs` - UTF-8 / GBK entry name decoding
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract/` - Entry sources and the extraction loop
//! - `entry.rs` - Extraction report types
//! - `options.rs` - Permission strategy and progress callback

pub use codec::{DecodedName, decode};
pub use entry::{ArchiveReport, ExtractedEntry};
pub use error::{Error, Result};
pub use extract::{EntrySource, EntryVisitor, RawEntry, ZipSource, extract, extract_zip};
pub use options::{ExtractOptions, PermissionStrategy, Progress};
pub use sanitize::{SanitizedPath, clean_path, sanitize_entry_name};

pub mod codec;
pub mod entry;
mod error;
pub mod extract;
pub mod options;
mod sanitize;
