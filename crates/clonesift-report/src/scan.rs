use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::aggregate::{AggregateResult, Aggregator};
use crate::classify::{Grammar, is_read_file};
use crate::error::Result;

/// Classify every read file below `root`.
///
/// Siblings are visited in file-name order so the clone ID order in the
/// result does not depend on directory listing order.
pub fn scan_dir(root: impl AsRef<Path>, grammar: &Grammar) -> Result<AggregateResult> {
    let root = root.as_ref();
    let mut aggregator = Aggregator::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_read_file(&name) {
            continue;
        }

        let classification = grammar.classify(&name);
        if !classification.is_valid() {
            warn!(file = %name, "read filename does not follow the naming grammar");
        }
        aggregator.record(classification);
    }

    let result = aggregator.finish();
    debug!(
        root = %root.display(),
        grammar = grammar.as_str(),
        genes = result.gene_count(),
        invalid = result.invalid_count(),
        "scanned read directory"
    );
    Ok(result)
}
