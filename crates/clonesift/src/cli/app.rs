use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::setup::CompletionsArg;

#[derive(Clone, Debug, Parser)]
#[command(name = "clonesift", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Extra config file, layered above ./clonesift.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "f", name = "fetch", about = "Download an order archive and summarize it")]
    Fetch(FetchArg),
    #[command(alias = "x", name = "extract", about = "Extract a local archive and summarize it")]
    Extract(ExtractArg),
    #[command(alias = "r", name = "reprocess", about = "Rebuild reports from an extracted directory")]
    Reprocess(ReprocessArg),
    #[command(alias = "a", name = "analyze", about = "Run the PCA analysis for every plate")]
    Analyze(AnalyzeArg),
    #[command(name = "completions", about = "Print shell completions")]
    Completions(CompletionsArg),
}

#[derive(Args, Clone, Debug)]
pub struct FetchArg {
    /// Order link containing order_id, user_email, password and key
    pub url: String,
    /// Root directory for order folders (overrides config work_dir)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
    /// Expected SHA-256 of the archive
    #[arg(long)]
    pub sha256: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ExtractArg {
    pub archive: PathBuf,
    pub dest: PathBuf,
    /// Where to write the reports (defaults to the destination)
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct ReprocessArg {
    pub dir: PathBuf,
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct AnalyzeArg {
    /// Directory holding the <base>_P_ plate folder
    #[arg(short, long)]
    pub dir: PathBuf,
    /// Plate base name (defaults to the directory name)
    #[arg(long)]
    pub base: Option<String>,
    /// Order id (defaults to the directory name)
    #[arg(long)]
    pub order: Option<String>,
}
