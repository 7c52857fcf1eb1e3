//! Batch runner for the downstream PCA/primer analysis binary.
//!
//! Plates live under `<dir>/<base>_P_/<base>_P_<letter>/`; each one gets a
//! single invocation fed by the order's `rename.txt`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::command::Command;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub program: String,
    pub input_suffix: String,
    pub bom_suffix: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            program: "calPCA".to_string(),
            input_suffix: "-自合.xlsx".to_string(),
            bom_suffix: "-引物订购单_BOM.xlsx".to_string(),
        }
    }
}

/// One planned invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlateRun {
    pub plate: String,
    pub args: Vec<OsString>,
}

#[derive(Debug)]
pub struct PlateOutcome {
    pub plate: String,
    pub status: Result<ExitStatus>,
}

impl PlateOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(&self.status, Ok(status) if status.success())
    }
}

/// Build the argument lists for every plate directory, sorted by name.
///
/// `base` and `order` default to the final component of `dir`.
pub fn plan(
    dir: &Path,
    base: Option<&str>,
    order: Option<&str>,
    work_dir: &Path,
    settings: &AnalysisSettings,
) -> Result<Vec<PlateRun>> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = base.unwrap_or(&dir_name);
    let order = order.unwrap_or(&dir_name);

    let root = plate_root(dir, base);
    let io_err = |source| Error::Io {
        path: root.clone(),
        source,
    };
    let pattern = Regex::new(&format!("^{}_P_[A-Z]$", regex::escape(base)))?;

    let mut plates = Vec::new();
    for entry in fs::read_dir(&root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if pattern.is_match(&name) {
            plates.push(name);
        }
    }
    plates.sort();

    let order_dir = work_dir.join(order);
    let sheets = order_dir.join(format!("{order}.os_all_file"));

    Ok(plates
        .into_iter()
        .map(|plate| {
            let prefix = root.join(&plate).join(&plate);
            let with_suffix = |suffix: &str| {
                let mut p = prefix.clone().into_os_string();
                p.push(suffix);
                p
            };
            let args = vec![
                "-i".into(),
                with_suffix(&settings.input_suffix),
                "-io".into(),
                with_suffix(&settings.bom_suffix),
                "-r".into(),
                sheets.join(clonesift_report::RENAME_FILE).into_os_string(),
                "-s".into(),
                sheets.clone().into_os_string(),
                "-o".into(),
                order_dir.join(&plate).into_os_string(),
            ];
            PlateRun { plate, args }
        })
        .collect())
}

/// Run every planned plate. A failing plate is logged and the rest still run.
pub fn run_all(runs: &[PlateRun], settings: &AnalysisSettings) -> Result<Vec<PlateOutcome>> {
    let program = Command::locate(&settings.program)?;

    Ok(runs
        .iter()
        .map(|run| {
            let mut cmd = Command::new(&program).args(&run.args);
            info!(plate = %run.plate, cmd = %cmd.display(), "running analysis");
            let status = cmd.status();
            match &status {
                Ok(s) if s.success() => info!(plate = %run.plate, "analysis succeeded"),
                Ok(s) => error!(plate = %run.plate, status = %s, "analysis failed"),
                Err(e) => error!(plate = %run.plate, error = %e, "analysis could not start"),
            }
            PlateOutcome {
                plate: run.plate.clone(),
                status,
            }
        })
        .collect())
}

pub fn plate_root(dir: &Path, base: &str) -> PathBuf {
    dir.join(format!("{base}_P_"))
}
