use std::path::{Path, PathBuf};

use clonesift_archive::PermissionStrategy;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisSettings;

pub const ENV_PREFIX: &str = "CLONESIFT_";
pub const LOCAL_FILE: &str = "clonesift.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root under which order directories are created.
    pub work_dir: PathBuf,
    pub permission_strategy: PermissionStrategy,
    pub fetch: FetchConfig,
    pub analysis: AnalysisSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub attempts: u32,
    pub sha256: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            permission_strategy: PermissionStrategy::default(),
            fetch: FetchConfig::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            sha256: None,
        }
    }
}

/// `~/.config/clonesift/config.toml`, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    home::home_dir().map(|h| h.join(".config").join("clonesift").join("config.toml"))
}

impl Config {
    /// Defaults < user file < `./clonesift.toml` < `explicit` < `CLONESIFT_*`.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut fig = Figment::from(Serialized::defaults(Config::default()));
        if let Some(user) = user_config_path() {
            fig = fig.merge(Toml::file(user));
        }
        fig = fig.merge(Toml::file(LOCAL_FILE));
        if let Some(path) = explicit {
            fig = fig.merge(Toml::file(path));
        }
        fig.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self, figment::Error> {
        Self::from_figment(Self::figment(explicit))
    }

    pub fn from_figment(fig: Figment) -> Result<Self, figment::Error> {
        fig.extract()
    }
}
