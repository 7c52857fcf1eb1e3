//! Report artifacts rendered from an [`AggregateResult`].
//!
//! All text outputs list genes sorted by name. Each file is written atomically
//! and independently: a failure leaves earlier artifacts in place.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use clonesift_fs::{AtomicWriteOptions, PermissionMode, atomic_write};
use tracing::info;

use crate::aggregate::{AggregateResult, GeneSummary};
use crate::error::{Error, Result};

pub const TSV_FILE: &str = "gene_clone_summary.txt";
pub const JSON_FILE: &str = "gene_clone_summary.json";
pub const HTML_FILE: &str = "gene_clone_summary.html";
pub const RENAME_FILE: &str = "rename.txt";

/// Full-width ideographic comma used between clone IDs.
pub const CLONE_SEPARATOR: &str = "\u{3001}";

/// Suffix of the second plate-well naming convention in `rename.txt`.
const ZERO_PLATE_SUFFIX: &str = "0P";

const HTML_STYLE: &str =
    "table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
    Tsv,
    Json,
    Html,
    Rename,
}

impl Artifact {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Tsv => TSV_FILE,
            Self::Json => JSON_FILE,
            Self::Html => HTML_FILE,
            Self::Rename => RENAME_FILE,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPaths {
    pub tsv: PathBuf,
    pub json: PathBuf,
    pub html: PathBuf,
    pub rename: PathBuf,
}

/// Write all four artifacts into `output_dir`, creating it if needed.
pub fn emit(output_dir: impl AsRef<Path>, result: &AggregateResult) -> Result<ReportPaths> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|e| Error::CreateDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let tsv = write_artifact(output_dir, Artifact::Tsv, &render_tsv(result))?;
    let json = write_artifact(output_dir, Artifact::Json, &render_json(result)?)?;
    let html = write_artifact(output_dir, Artifact::Html, &render_html(result))?;
    let rename = write_artifact(output_dir, Artifact::Rename, &render_rename(result))?;

    info!(
        dir = %output_dir.display(),
        genes = result.gene_count(),
        invalid = result.invalid_count(),
        "wrote gene clone reports"
    );

    Ok(ReportPaths {
        tsv,
        json,
        html,
        rename,
    })
}

/// Reports are readable by the analysis step regardless of the caller's umask.
fn write_artifact(dir: &Path, artifact: Artifact, content: &str) -> Result<PathBuf> {
    let path = dir.join(artifact.file_name());
    let options = AtomicWriteOptions::new()
        .permissions(PermissionMode::ReadWrite)
        .sync(true);
    atomic_write(&path, content.as_bytes(), options)
        .map_err(|source| Error::Write { artifact, source })?;
    Ok(path)
}

pub fn render_tsv(result: &AggregateResult) -> String {
    let mut out = String::from("GeneName\tCloneCount\tCloneIDs\n");
    for gene in result.sorted_genes() {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            gene.gene_name(),
            gene.clone_count(),
            joined_clone_ids(gene)
        );
    }
    out
}

/// Pretty JSON keyed by gene name. Keys happen to come out sorted; consumers
/// must not depend on that.
pub fn render_json(result: &AggregateResult) -> Result<String> {
    let genes: BTreeMap<&str, &GeneSummary> = result
        .genes()
        .iter()
        .map(|(name, summary)| (name.as_str(), summary))
        .collect();
    let mut out = serde_json::to_string_pretty(&genes)?;
    out.push('\n');
    Ok(out)
}

pub fn render_html(result: &AggregateResult) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html><head><meta charset='UTF-8'><title>Gene Clone Summary</title>\n");
    let _ = writeln!(out, "<style>{HTML_STYLE}</style>");
    out.push_str("</head><body>\n");
    out.push_str("<h2>Gene Clone Summary</h2>\n");
    let _ = writeln!(out, "<p><b>Valid gene names:</b> {}</p>", result.gene_count());
    let _ = writeln!(
        out,
        "<p><b>Invalid read filenames:</b> {}</p>",
        result.invalid_count()
    );
    out.push_str(
        "<table><thead><tr><th>GeneName</th><th>CloneCount</th><th>CloneIDs</th></tr></thead><tbody>\n",
    );
    for gene in result.sorted_genes() {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(gene.gene_name()),
            gene.clone_count(),
            escape_html(&joined_clone_ids(gene))
        );
    }
    out.push_str("</tbody></table>\n");
    out.push_str("</body></html>\n");
    out
}

/// Two lines per gene: `gene\tprefix` and `gene0P\tprefix`.
pub fn render_rename(result: &AggregateResult) -> String {
    let mut out = String::new();
    for gene in result.sorted_genes() {
        let prefix = gene.display_prefix();
        let _ = writeln!(out, "{}\t{}", gene.gene_name(), prefix);
        let _ = writeln!(out, "{}{}\t{}", gene.gene_name(), ZERO_PLATE_SUFFIX, prefix);
    }
    out
}

fn joined_clone_ids(gene: &GeneSummary) -> String {
    gene.clone_ids().join(CLONE_SEPARATOR)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
