use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use clonesift::analysis;
use clonesift::config::Config;
use clonesift::fetch::HttpFetcher;
use clonesift::order::OrderRequest;
use clonesift::pipeline::{self, RunSummary};
use clonesift::ui::table::summary_table;
use clonesift::ui::tracker::{ExtractTracker, Tracker};
use clonesift_archive::ExtractOptions;
use clonesift_report::{AggregateResult, Grammar, ReportPaths};
use tracing::info;

use crate::cli::app::{AnalyzeArg, App, Commands, ExtractArg, FetchArg, ReprocessArg};
use crate::cli::setup;

pub fn dispatch(app: App) -> Result<()> {
    let load = || Config::load(app.config.as_deref()).context("Failed to load configuration");
    match app.cmd {
        Commands::Fetch(arg) => fetch(arg, &load()?),
        Commands::Extract(arg) => extract(arg, &load()?),
        Commands::Reprocess(arg) => reprocess(arg),
        Commands::Analyze(arg) => analyze(arg, &load()?),
        Commands::Completions(arg) => setup::completions(arg),
    }
}

fn extract_options(config: &Config, tracker: &ExtractTracker) -> ExtractOptions {
    ExtractOptions::default()
        .permission_strategy(config.permission_strategy)
        .on_progress(tracker.extract_callback())
}

fn fetch(arg: FetchArg, config: &Config) -> Result<()> {
    let request = OrderRequest::parse(&arg.url).context("Failed to parse order url")?;
    let root = arg.work_dir.as_deref().unwrap_or(&config.work_dir);
    let fetcher = HttpFetcher::new()?
        .attempts(config.fetch.attempts)
        .expected_sha256(arg.sha256.or_else(|| config.fetch.sha256.clone()))
        .progress(std::io::stderr().is_terminal());

    let tracker = ExtractTracker::new(());
    let summary = pipeline::run_order(
        &request,
        root,
        &fetcher,
        &extract_options(config, &tracker),
        Grammar::standard(),
    )
    .with_context(|| format!("Failed to process order {}", request.order_id))?;
    tracker.finish(None);

    print_run(&summary);
    Ok(())
}

fn extract(arg: ExtractArg, config: &Config) -> Result<()> {
    let report_dir = arg.report_dir.as_deref().unwrap_or(&arg.dest);
    let tracker = ExtractTracker::new(());
    let summary = pipeline::run(
        &arg.archive,
        &arg.dest,
        report_dir,
        &extract_options(config, &tracker),
        Grammar::standard(),
    )
    .with_context(|| format!("Failed to extract {}", arg.archive.display()))?;
    tracker.finish(None);

    print_run(&summary);
    Ok(())
}

fn reprocess(arg: ReprocessArg) -> Result<()> {
    let report_dir = arg.report_dir.as_deref().unwrap_or(&arg.dir);
    let (aggregate, reports) = pipeline::reprocess(&arg.dir, report_dir, Grammar::standard())
        .with_context(|| format!("Failed to reprocess {}", arg.dir.display()))?;

    print_summary(&aggregate, &reports);
    Ok(())
}

fn analyze(arg: AnalyzeArg, config: &Config) -> Result<()> {
    let runs = analysis::plan(
        &arg.dir,
        arg.base.as_deref(),
        arg.order.as_deref(),
        &config.work_dir,
        &config.analysis,
    )
    .with_context(|| format!("Failed to list plates under {}", arg.dir.display()))?;

    if runs.is_empty() {
        bail!("no plate directories found under {}", arg.dir.display());
    }

    let outcomes = analysis::run_all(&runs, &config.analysis)?;
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.succeeded())
        .map(|o| o.plate.as_str())
        .collect();
    info!(plates = outcomes.len(), failed = failed.len(), "analysis finished");

    if !failed.is_empty() {
        bail!("analysis failed for: {}", failed.join(", "));
    }
    Ok(())
}

fn print_run(summary: &RunSummary) {
    info!(
        entries = summary.entries,
        files = summary.files,
        bytes = summary.total_bytes,
        "archive extracted"
    );
    print_summary(&summary.aggregate, &summary.reports);
}

fn print_summary(aggregate: &AggregateResult, reports: &ReportPaths) {
    println!("{}", summary_table(aggregate));
    for path in [&reports.tsv, &reports.json, &reports.html, &reports.rename] {
        println!("{}", path.display());
    }
}
