//! Read filename grammar.
//!
//! A read file is named `<batch><sep><gene><hyphens><clone>.T7...` where
//!
//! - `batch` is four digits, `EG` and one uppercase letter (`2024EGA`),
//! - `sep` is `-` or `_`,
//! - `gene` is three digits followed by any ASCII alphanumerics (`001X`),
//! - `hyphens` is one or two `-`,
//! - `clone` is one or more digits.
//!
//! Both separator spellings come from older and newer plate sheets and are
//! accepted alike. Anything after `.T7` is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Suffix of candidate read files inside an archive.
pub const READ_SUFFIX: &str = ".ab1";

/// Capture groups: batch, gene, clone. `[0-9]` keeps digit matching ASCII-only.
pub const STANDARD_PATTERN: &str =
    r"^([0-9]{4}EG[A-Z])[-_]([0-9]{3}[a-zA-Z0-9]*)-{1,2}([0-9]+)\.T7";

static STANDARD: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new(STANDARD_PATTERN).expect("standard read filename grammar is valid")
});

/// Whether `name` is a candidate read file and should be classified.
pub fn is_read_file(name: &str) -> bool {
    name.ends_with(READ_SUFFIX)
}

/// Fields of a well-formed read filename.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReadName {
    pub batch_code: String,
    pub gene_code: String,
    pub clone_id: String,
}

impl ReadName {
    /// Aggregation key: `batch_code + "_" + gene_code`.
    pub fn gene_name(&self) -> String {
        format!("{}_{}", self.batch_code, self.gene_code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Valid(ReadName),
    Invalid,
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// A compiled filename grammar with exactly three capture groups.
#[derive(Clone, Debug)]
pub struct Grammar {
    pattern: Regex,
}

impl Grammar {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::Grammar {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let groups = regex.captures_len() - 1;
        if groups != 3 {
            return Err(Error::Grammar {
                pattern: pattern.to_string(),
                reason: format!("expected 3 capture groups (batch, gene, clone), found {groups}"),
            });
        }

        Ok(Self { pattern: regex })
    }

    /// The production grammar, compiled once.
    pub fn standard() -> &'static Grammar {
        &STANDARD
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Classify a base name. Total and pure.
    pub fn classify(&self, base_name: &str) -> Classification {
        let Some(caps) = self.pattern.captures(base_name) else {
            return Classification::Invalid;
        };

        match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(batch), Some(gene), Some(clone)) => Classification::Valid(ReadName {
                batch_code: batch.as_str().to_string(),
                gene_code: gene.as_str().to_string(),
                clone_id: clone.as_str().to_string(),
            }),
            _ => Classification::Invalid,
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::standard().clone()
    }
}
