//! Order download links.
//!
//! The LIMS hands out links of the form
//! `https://host/path?order_id=..&user_email=..&password=..&key=..`; the bulk
//! archive of an order is served from the same endpoint with
//! `action=os_all_file`.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{Error, Result};

const REQUIRED: [&str; 4] = ["order_id", "user_email", "password", "key"];
const SECRET: [&str; 2] = ["password", "key"];
const ACTION: &str = "os_all_file";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRequest {
    pub order_id: String,
    pub download_url: Url,
}

/// Where an order's files live below the working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderLayout {
    pub output_dir: PathBuf,
    pub zip_path: PathBuf,
    pub extract_dir: PathBuf,
}

impl OrderRequest {
    pub fn parse(raw_url: &str) -> Result<Self> {
        let url = Url::parse(raw_url).map_err(|e| Error::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        let lookup = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .copied()
            .filter(|k| lookup(*k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingParameters(missing));
        }

        let value = |key: &str| lookup(key).unwrap_or_default();
        let order_id = value("order_id");

        if order_id == "." || order_id == ".." || order_id.contains(['/', '\\']) {
            return Err(Error::InvalidOrderId(order_id));
        }

        let mut download_url = url.clone();
        download_url.set_fragment(None);
        download_url.set_query(None);
        download_url
            .query_pairs_mut()
            .append_pair("action", ACTION)
            .append_pair("key", &value("key"))
            .append_pair("order_id", &order_id)
            .append_pair("password", &value("password"))
            .append_pair("user_email", &value("user_email"));

        Ok(Self {
            order_id,
            download_url,
        })
    }

    /// Download URL with credentials masked, for logs and errors.
    pub fn redacted_url(&self) -> String {
        redact(&self.download_url)
    }

    pub fn layout(&self, root: impl AsRef<Path>) -> OrderLayout {
        let output_dir = root.as_ref().join(&self.order_id);
        OrderLayout {
            zip_path: output_dir.join(format!("{}.{ACTION}.zip", self.order_id)),
            extract_dir: output_dir.join(format!("{}.{ACTION}", self.order_id)),
            output_dir,
        }
    }
}

pub(crate) fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
