use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::order::redact;
use crate::ui::tracker::{ProgressTracker, ProgressTrackerConfig, Tracker};

const CHUNK: usize = 64 * 1024;

/// Downloads a resource to a local file.
pub trait Fetch {
    fn fetch(&self, url: &Url, dest: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    attempts: u32,
    expected_sha256: Option<String>,
    progress: bool,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(None)
            .build()
            .map_err(|e| Error::Http {
                url: String::new(),
                source: e,
            })?;
        Ok(Self {
            client,
            attempts: 3,
            expected_sha256: None,
            progress: true,
        })
    }

    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn expected_sha256(mut self, digest: Option<String>) -> Self {
        self.expected_sha256 = digest.map(|d| d.to_ascii_lowercase());
        self
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    fn fetch_once(&self, url: &Url, dest: &Path) -> Result<String> {
        let shown = redact(url);
        let mut response = self.client.get(url.clone()).send().map_err(|e| Error::Http {
            url: shown.clone(),
            source: e.without_url(),
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::BadStatus { url: shown, status });
        }

        let io_err = |source| Error::Io {
            path: dest.to_path_buf(),
            source,
        };
        let file = File::create(dest).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let mut hasher = Sha256::new();
        let tracker = self.progress.then(|| {
            ProgressTracker::new(ProgressTrackerConfig {
                len: response.content_length(),
            })
        });

        let mut buf = vec![0u8; CHUNK];
        loop {
            let n = response.read(&mut buf).map_err(io_err)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            writer.write_all(&buf[..n]).map_err(io_err)?;
            if let Some(tracker) = &tracker {
                tracker.pb.inc(n as u64);
            }
        }
        writer.flush().map_err(io_err)?;

        if let Some(tracker) = &tracker {
            tracker.finish(Some("downloaded".to_string()));
        }

        Ok(hex::encode(hasher.finalize()))
    }

    /// A complete download with the wrong digest is deleted and not retried.
    fn check_download(&self, dest: &Path, actual: &str) -> Result<()> {
        if let Some(expected) = &self.expected_sha256 {
            if let Err(e) = verify_digest(expected, actual) {
                let _ = fs::remove_file(dest);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url, dest: &Path) -> Result<PathBuf> {
        let mut last_err = None;

        for attempt in 1..=self.attempts {
            info!(url = %redact(url), dest = %dest.display(), attempt, "downloading");
            match self.fetch_once(url, dest) {
                Ok(actual) => {
                    self.check_download(dest, &actual)?;
                    info!(sha256 = %actual, "download complete");
                    return Ok(dest.to_path_buf());
                }
                Err(e) => {
                    warn!(attempt, attempts = self.attempts, error = %e, "download attempt failed");
                    let _ = fs::remove_file(dest);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| Error::BadStatus {
            url: redact(url),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        }))
    }
}

/// Compare a hex digest against the expected one, ignoring case.
pub fn verify_digest(expected: &str, actual: &str) -> Result<()> {
    if expected.eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn digest_comparison_ignores_case() {
        assert!(verify_digest(&HELLO_SHA256.to_uppercase(), HELLO_SHA256).is_ok());
    }

    #[test]
    fn digest_mismatch_is_reported() {
        let err = verify_digest(HELLO_SHA256, "00").unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn mismatched_download_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("T240101.os_all_file.zip");
        fs::write(&path, b"hello").unwrap();
        let fetcher = HttpFetcher::new()
            .unwrap()
            .expected_sha256(Some(HELLO_SHA256.to_string()));

        let err = fetcher.check_download(&path, "00").unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn matching_download_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("T240101.os_all_file.zip");
        fs::write(&path, b"hello").unwrap();
        let fetcher = HttpFetcher::new()
            .unwrap()
            .expected_sha256(Some(HELLO_SHA256.to_uppercase()));

        fetcher.check_download(&path, HELLO_SHA256).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn attempts_never_drop_below_one() {
        let fetcher = HttpFetcher::new().unwrap().attempts(0);
        assert_eq!(fetcher.attempts, 1);
    }

    #[test]
    fn unreachable_host_fails_after_all_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.zip");
        let fetcher = HttpFetcher::new().unwrap().attempts(2).progress(false);
        let url = Url::parse("http://127.0.0.1:9/order.zip").unwrap();

        let err = fetcher.fetch(&url, &dest).unwrap_err();
        assert!(matches!(err, Error::Http { .. }));
        assert!(!dest.exists());
    }
}
