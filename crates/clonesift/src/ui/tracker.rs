use std::sync::Arc;

use clonesift_archive::Progress;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

pub trait Tracker {
    type Ctx: Clone;
    fn new(ctx: Self::Ctx) -> Self;
    fn finish(&self, msg: Option<String>);
}

const BYTES_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const ENTRIES_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

fn style(template: &str) -> Option<ProgressStyle> {
    ProgressStyle::with_template(template)
        .ok()
        .map(|s| s.tick_chars(TICK).progress_chars(PB_CHARS))
}

static BYTES_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| style(BYTES_STYLE));

static ENTRIES_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| style(ENTRIES_STYLE));

/// Byte-oriented bar for downloads.
pub struct ProgressTracker {
    pub pb: ProgressBar,
}

#[derive(Debug, Clone)]
pub struct ProgressTrackerConfig {
    pub len: Option<u64>,
}

impl Tracker for ProgressTracker {
    type Ctx = ProgressTrackerConfig;

    fn new(ctx: Self::Ctx) -> Self {
        let pb = match ctx.len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::no_length(),
        };
        if let Some(style) = BYTES_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        ProgressTracker { pb }
    }

    fn finish(&self, msg: Option<String>) {
        match msg {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish(),
        }
    }
}

/// Entry-count bar driven by the extractor's progress callback.
#[derive(Clone)]
pub struct ExtractTracker {
    pub pb: ProgressBar,
}

impl Tracker for ExtractTracker {
    type Ctx = ();

    fn new(_: ()) -> Self {
        let pb = ProgressBar::no_length();
        if let Some(style) = ENTRIES_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        ExtractTracker { pb }
    }

    fn finish(&self, msg: Option<String>) {
        match msg {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish_and_clear(),
        }
    }
}

impl ExtractTracker {
    pub fn update(&self, progress: &Progress) {
        self.pb.set_length(progress.total_entries as u64);
        self.pb.set_position(progress.entries_processed as u64);
        if let Some(file) = &progress.current_file {
            self.pb.set_message(file.display().to_string());
        }
    }

    pub fn extract_callback(&self) -> Arc<dyn Fn(Progress) + Send + Sync> {
        let tracker = self.clone();
        Arc::new(move |progress: Progress| tracker.update(&progress))
    }
}
