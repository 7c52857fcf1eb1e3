//! Extract, classify, aggregate, report.

use std::fs;
use std::path::{Path, PathBuf};

use clonesift_archive::{ArchiveReport, EntryVisitor, ExtractOptions, ExtractedEntry, extract_zip};
use clonesift_report::{
    AggregateResult, Aggregator, Classification, Grammar, ReportPaths, emit, is_read_file, scan_dir,
};
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::order::OrderRequest;

#[derive(Debug)]
pub struct Extraction {
    pub report: ArchiveReport,
    pub aggregate: AggregateResult,
}

/// Classifies each extracted read file by its base name as it lands on disk.
pub struct ReadClassifier<'g> {
    grammar: &'g Grammar,
    aggregator: Aggregator,
}

impl<'g> ReadClassifier<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            aggregator: Aggregator::new(),
        }
    }

    pub fn finish(self) -> AggregateResult {
        self.aggregator.finish()
    }
}

impl EntryVisitor for ReadClassifier<'_> {
    fn visit_file(&mut self, entry: &ExtractedEntry) {
        let name = entry.base_name();
        if !is_read_file(name) {
            return;
        }
        let classification = self.grammar.classify(name);
        if let Classification::Invalid = classification {
            warn!(file = %entry.name, "read filename does not match the naming scheme");
        }
        self.aggregator.record(classification);
    }
}

pub fn extract_and_classify(
    archive: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &ExtractOptions,
    grammar: &Grammar,
) -> Result<Extraction> {
    let mut classifier = ReadClassifier::new(grammar);
    let report = extract_zip(archive, dest, options, &mut classifier).inspect_err(|e| {
        if e.is_security() {
            error!(error = %e, "archive rejected, remaining entries were not extracted");
        }
    })?;
    Ok(Extraction {
        report,
        aggregate: classifier.finish(),
    })
}

#[derive(Debug)]
pub struct RunSummary {
    pub entries: usize,
    pub files: usize,
    pub total_bytes: u64,
    pub aggregate: AggregateResult,
    pub reports: ReportPaths,
}

/// Extract `archive` into `dest` and write the reports into `report_dir`.
pub fn run(
    archive: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    report_dir: impl AsRef<Path>,
    options: &ExtractOptions,
    grammar: &Grammar,
) -> Result<RunSummary> {
    let Extraction { report, aggregate } = extract_and_classify(archive, dest, options, grammar)?;
    let reports = emit(report_dir, &aggregate)?;
    info!(
        entries = report.entry_count,
        genes = aggregate.gene_count(),
        invalid = aggregate.invalid_count(),
        "run complete"
    );
    Ok(RunSummary {
        entries: report.entry_count,
        files: report.files().count(),
        total_bytes: report.total_bytes,
        aggregate,
        reports,
    })
}

/// Re-scan an already extracted tree and rewrite its reports.
pub fn reprocess(
    dir: impl AsRef<Path>,
    report_dir: impl AsRef<Path>,
    grammar: &Grammar,
) -> Result<(AggregateResult, ReportPaths)> {
    let aggregate = scan_dir(dir, grammar)?;
    let reports = emit(report_dir, &aggregate)?;
    Ok((aggregate, reports))
}

/// Download an order's bulk archive under `root` and process it.
///
/// Reports land next to the extracted reads, where the analysis step looks
/// for `rename.txt`.
pub fn run_order(
    request: &OrderRequest,
    root: impl AsRef<Path>,
    fetcher: &dyn Fetch,
    options: &ExtractOptions,
    grammar: &Grammar,
) -> Result<RunSummary> {
    let layout = request.layout(root);
    fs::create_dir_all(&layout.output_dir).map_err(|e| Error::Io {
        path: layout.output_dir.clone(),
        source: e,
    })?;

    info!(order = %request.order_id, url = %request.redacted_url(), "fetching order archive");
    let archive: PathBuf = fetcher.fetch(&request.download_url, &layout.zip_path)?;

    run(&archive, &layout.extract_dir, &layout.extract_dir, options, grammar)
}
