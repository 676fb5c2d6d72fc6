//! Artifact acquisition from the release API.
//!
//! Auto-download mode is a two-phase operation:
//!
//! 1. **Resolution** - GET the fixed API endpoint with the platform and
//!    release-track query and the identifying `User-Agent`, and extract the
//!    download URL from the JSON body. The URL must appear as a non-null
//!    string under `url` or, failing that, `download_url`; anything else is
//!    a [`OrbitupError::Resolution`] and no transfer is attempted.
//! 2. **Transfer** - stream the resolved URL to the fixed staging path,
//!    overwriting any prior content there. A failed transfer or a
//!    zero-length result is a [`OrbitupError::Download`].
//!
//! There are no retries and no timeout: a single failed attempt surfaces
//! immediately to the caller (which may offer a manual fallback), and an
//! unresponsive endpoint hangs the tool — a documented limitation.
//!
//! The fetcher owns the staging path only until hand-off: the returned
//! [`DownloadResult`] is consumed by the installer, which moves (not
//! copies) the file into place.

use crate::config::Config;
use crate::constants;
use crate::core::error::OrbitupError;
use crate::utils::fs::ensure_dir;
use crate::utils::progress;
use anyhow::{Context, Result};
use futures::StreamExt;
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Outcome of a successful fetch: the staged file, ready to hand off.
#[derive(Debug)]
pub struct DownloadResult {
    /// Local path of the staged artifact.
    pub path: PathBuf,
    /// Number of bytes received; always greater than zero.
    pub bytes: u64,
}

/// Downloads the release artifact to the staging path.
pub struct ArtifactFetcher<'a> {
    config: &'a Config,
    client: reqwest::Client,
}

impl<'a> ArtifactFetcher<'a> {
    /// Create a fetcher with the configured identity.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn new(config: &'a Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    /// Resolve the download URL and stage the artifact.
    pub async fn fetch(&self) -> Result<DownloadResult> {
        let url = self.resolve().await?;
        self.download(&url).await
    }

    /// Query the release API and extract the download URL.
    async fn resolve(&self) -> Result<String> {
        debug!(api = %self.config.api_url, track = %self.config.release_track, "resolving download URL");

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("platform", constants::RELEASE_PLATFORM),
                ("track", self.config.release_track.as_str()),
            ])
            .send()
            .await
            .map_err(OrbitupError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrbitupError::Resolution {
                reason: format!("release API returned HTTP {status}"),
            }
            .into());
        }

        let body: Value = response.json().await.map_err(|e| OrbitupError::Resolution {
            reason: format!("release API response is not valid JSON: {e}"),
        })?;

        let url = resolve_download_url(&body).ok_or_else(|| OrbitupError::Resolution {
            reason: format!(
                "response contained neither `{}` nor `{}`",
                constants::URL_KEY_PRIMARY,
                constants::URL_KEY_FALLBACK
            ),
        })?;

        debug!(%url, "resolved download URL");
        Ok(url)
    }

    /// Stream `url` to the staging path and verify a non-empty result.
    async fn download(&self, url: &str) -> Result<DownloadResult> {
        let staging = &self.config.staging_path;
        if let Some(parent) = staging.parent() {
            ensure_dir(parent).map_err(|e| OrbitupError::FileSystem {
                operation: "create staging directory".to_string(),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let response =
            self.client.get(url).send().await.map_err(|e| OrbitupError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrbitupError::Download {
                url: url.to_string(),
                reason: format!("server returned HTTP {status}"),
            }
            .into());
        }

        let bar = progress::download_bar(response.content_length());
        let mut file = tokio::fs::File::create(staging)
            .await
            .map_err(|e| OrbitupError::FileSystem {
                operation: "create staging file".to_string(),
                path: staging.clone(),
                source: e,
            })?;

        let mut bytes: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| OrbitupError::Download {
                url: url.to_string(),
                reason: format!("transfer interrupted: {e}"),
            })?;
            file.write_all(&chunk).await.map_err(|e| OrbitupError::FileSystem {
                operation: "write staging file".to_string(),
                path: staging.clone(),
                source: e,
            })?;
            bytes += chunk.len() as u64;
            bar.set_position(bytes);
        }
        file.flush().await.map_err(OrbitupError::Io)?;
        bar.finish_and_clear();

        if bytes == 0 {
            return Err(OrbitupError::Download {
                url: url.to_string(),
                reason: "downloaded file is empty".to_string(),
            }
            .into());
        }

        info!(bytes, path = %staging.display(), "artifact staged");
        Ok(DownloadResult { path: staging.clone(), bytes })
    }
}

/// Extract the download URL from a release API response body.
///
/// The primary key wins; the fallback key is consulted only when the
/// primary is absent or null. A non-string or null value under both keys
/// resolves to `None`.
pub fn resolve_download_url(body: &Value) -> Option<String> {
    [constants::URL_KEY_PRIMARY, constants::URL_KEY_FALLBACK]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primary_key_wins() {
        let body = json!({"url": "https://a.example/app", "download_url": "https://b.example/app"});
        assert_eq!(resolve_download_url(&body).unwrap(), "https://a.example/app");
    }

    #[test]
    fn fallback_key_used_when_primary_absent() {
        let body = json!({"download_url": "https://b.example/app"});
        assert_eq!(resolve_download_url(&body).unwrap(), "https://b.example/app");
    }

    #[test]
    fn fallback_key_used_when_primary_null() {
        let body = json!({"url": null, "download_url": "https://b.example/app"});
        assert_eq!(resolve_download_url(&body).unwrap(), "https://b.example/app");
    }

    #[test]
    fn neither_key_yields_none() {
        assert_eq!(resolve_download_url(&json!({"name": "orbit"})), None);
        assert_eq!(resolve_download_url(&json!({"url": null, "download_url": null})), None);
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert_eq!(resolve_download_url(&json!({"url": 42})), None);
        assert_eq!(resolve_download_url(&json!({"download_url": ["https://a"]})), None);
    }

    #[tokio::test]
    async fn unreachable_api_surfaces_an_error() {
        let root = tempfile::TempDir::new().unwrap();
        let mut config = Config::for_test_root(root.path());
        // Nothing listens on this port; the connection is refused immediately.
        config.api_url = "http://127.0.0.1:9/latest".to_string();
        let fetcher = ArtifactFetcher::new(&config).unwrap();
        assert!(fetcher.fetch().await.is_err());
    }
}
