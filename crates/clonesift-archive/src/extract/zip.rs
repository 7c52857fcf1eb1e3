use std::io::{Read, Seek};

use crate::Result;
use crate::extract::{EntrySource, RawEntry};

/// Entry source over a zip archive.
///
/// Names are taken from the raw header bytes; the `zip` crate's own decoding
/// and `enclosed_name` filtering are bypassed so that [`crate::codec`] and
/// [`crate::sanitize_entry_name`] see exactly what the archive declares.
pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn len(&self) -> usize {
        self.archive.len()
    }

    fn entry(&mut self, index: usize) -> Result<RawEntry<'_>> {
        let file = self.archive.by_index(index)?;

        let raw_name = file.name_raw().to_vec();
        let is_dir = file.is_dir() || matches!(raw_name.last(), Some(b'/') | Some(b'\\'));
        let mode = file.unix_mode();
        let size = file.size();

        Ok(RawEntry {
            raw_name,
            is_dir,
            mode,
            size,
            reader: Box::new(file),
        })
    }
}
