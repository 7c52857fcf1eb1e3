//! Classification and reporting of extracted sequencing reads.
//!
//! - `classify.rs` - the `<batch>-<gene>-<clone>.T7` filename grammar
//! - `aggregate.rs` - per-gene clone lists
//! - `emit.rs` - txt / json / html / rename artifacts
//! - `scan.rs` - re-classification of an already extracted tree

pub use aggregate::{AggregateResult, Aggregator, GeneSummary, aggregate};
pub use classify::{Classification, Grammar, READ_SUFFIX, ReadName, STANDARD_PATTERN, is_read_file};
pub use emit::{
    Artifact, CLONE_SEPARATOR, HTML_FILE, JSON_FILE, RENAME_FILE, ReportPaths, TSV_FILE, emit,
    render_html, render_json, render_rename, render_tsv,
};
pub use error::{Error, Result};
pub use scan::scan_dir;

pub mod aggregate;
pub mod classify;
pub mod emit;
mod error;
pub mod scan;
