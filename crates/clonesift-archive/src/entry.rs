use std::path::PathBuf;

/// An archive entry after it has been written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Decoded entry name with `/` separators.
    pub name: String,
    pub target_path: PathBuf,
    pub size: u64,
    pub mode: Option<u32>,
    pub is_directory: bool,
    /// The name needed the GBK or lossy fallback.
    pub name_fallback: bool,
}

impl ExtractedEntry {
    /// Final path component of the entry name.
    pub fn base_name(&self) -> &str {
        self.name
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

impl ArchiveReport {
    /// Non-directory entries, in archive order.
    pub fn files(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| !e.is_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ExtractedEntry {
        ExtractedEntry {
            name: name.to_string(),
            target_path: PathBuf::from("/out").join(name),
            size: 1024,
            mode: Some(0o644),
            is_directory: false,
            name_fallback: false,
        }
    }

    #[test]
    fn base_name_of_nested_entry() {
        assert_eq!(file("报告成功/2024EGA-001X-4.T7.ab1").base_name(), "2024EGA-001X-4.T7.ab1");
        assert_eq!(file("top.ab1").base_name(), "top.ab1");
    }

    #[test]
    fn base_name_of_directory_entry() {
        let mut dir = file("plates/A/");
        dir.is_directory = true;
        assert_eq!(dir.base_name(), "A");
    }

    #[test]
    fn report_files_skips_directories() {
        let mut dir = file("plates/");
        dir.is_directory = true;
        let report = ArchiveReport {
            entry_count: 2,
            total_bytes: 1024,
            entries: vec![dir, file("plates/a.ab1")],
        };
        let names: Vec<_> = report.files().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["plates/a.ab1"]);
    }
}
