//! Streaming extraction of archive entries.
//!
//! # Platform Behavior
//!
//! **Unix**: entry mode bits are applied according to the selected
//! `PermissionStrategy`.
//!
//! **Windows (non-Unix)**: only the read-only attribute is derived from the
//! mode bits.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::codec::{self, DecodedName};
use crate::entry::{ArchiveReport, ExtractedEntry};
use crate::error::{Error, Result};
use crate::options::{ExtractOptions, Progress};
use crate::sanitize::sanitize_entry_name;

mod zip;

pub use self::zip::ZipSource;

/// One entry as declared by the archive, before decoding and sanitizing.
pub struct RawEntry<'a> {
    pub raw_name: Vec<u8>,
    pub is_dir: bool,
    pub mode: Option<u32>,
    pub size: u64,
    pub reader: Box<dyn Read + 'a>,
}

/// Archive-specific entry source.
///
/// Entries are addressed by index and visited in index order.
pub trait EntrySource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&mut self, index: usize) -> Result<RawEntry<'_>>;
}

/// Called once per extracted file, after its content is on disk.
pub trait EntryVisitor {
    fn visit_file(&mut self, entry: &ExtractedEntry);
}

impl<F: FnMut(&ExtractedEntry)> EntryVisitor for F {
    fn visit_file(&mut self, entry: &ExtractedEntry) {
        self(entry)
    }
}

/// Open `archive_path` as a zip archive and extract it into `destination`.
pub fn extract_zip<V: EntryVisitor + ?Sized>(
    archive_path: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
    visitor: &mut V,
) -> Result<ArchiveReport> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|e| Error::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut source = ZipSource::new(BufReader::new(file))?;

    info!(archive = %archive_path.display(), entries = source.len(), "extracting archive");
    extract(&mut source, destination, options, visitor)
}

/// Main extraction loop.
///
/// Entries are processed strictly in index order. The first entry whose name
/// escapes `destination` aborts the whole call before anything is written for
/// it; entries already extracted stay on disk.
pub fn extract<S, V>(
    source: &mut S,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
    visitor: &mut V,
) -> Result<ArchiveReport>
where
    S: EntrySource + ?Sized,
    V: EntryVisitor + ?Sized,
{
    let destination = destination.as_ref();
    let total_entries = source.len();
    let mut entries = Vec::with_capacity(total_entries);
    let mut total_bytes = 0u64;

    ensure_directory(destination)?;

    for index in 0..total_entries {
        let mut raw = source.entry(index)?;

        let decoded = codec::decode(&raw.raw_name);
        match &decoded {
            DecodedName::Utf8(_) => {}
            DecodedName::Legacy(name) => debug!(%name, "entry name decoded as GBK"),
            DecodedName::Lossy(name) => warn!(%name, "entry name is neither UTF-8 nor GBK"),
        }
        let name_fallback = decoded.is_fallback();

        let sanitized = sanitize_entry_name(decoded.as_str(), destination)?;

        let size = if raw.is_dir {
            ensure_directory(&sanitized.resolved)?;
            0
        } else {
            let written = write_file(&mut raw.reader, &sanitized.resolved)?;
            options
                .perm_strategy
                .apply_to_path(&sanitized.resolved, raw.mode)?;
            written
        };
        total_bytes += size;

        let entry = ExtractedEntry {
            name: sanitized.original,
            target_path: sanitized.resolved,
            size,
            mode: raw.mode,
            is_directory: raw.is_dir,
            name_fallback,
        };
        debug!(entry = %entry.name, size, "extracted");

        if !entry.is_directory {
            visitor.visit_file(&entry);
        }

        if let Some(ref callback) = options.on_progress {
            callback(Progress {
                bytes_processed: total_bytes,
                entries_processed: index + 1,
                total_entries,
                current_file: Some(entry.target_path.clone()),
            });
        }

        entries.push(entry);
    }

    info!(entries = entries.len(), total_bytes, "extraction finished");

    Ok(ArchiveReport {
        entry_count: entries.len(),
        total_bytes,
        entries,
    })
}

fn write_file(reader: &mut dyn Read, target_path: &Path) -> Result<u64> {
    if let Some(parent) = target_path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })
}

fn ensure_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
