use crate::artifacts::retry::{calculate_next_backoff, execute_with_timeout, is_retryable};
use crate::artifacts::ARTIFACT_EXTENSION;
use crate::config::ArtifactsConfig;
use crate::errors::{FetchError, FetchResult};
use crate::programs::SourceRepository;
use flate2::read::GzDecoder;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Per-download knobs handed to an [`ArtifactDownloader`]
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOptions {
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self::from(&ArtifactsConfig::default())
    }
}

impl From<&ArtifactsConfig> for DownloadOptions {
    fn from(config: &ArtifactsConfig) -> Self {
        Self {
            timeout_seconds: config.timeout_seconds,
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            backoff_multiplier: config.backoff_multiplier,
            max_backoff_seconds: config.max_backoff_seconds,
        }
    }
}

/// Populates a directory with a repository's compiled program artifacts
///
/// An empty `version` means "use the configured default".
pub trait ArtifactDownloader: Send + Sync {
    fn download(
        &self,
        repository: SourceRepository,
        destination: &Path,
        version: &str,
        options: &DownloadOptions,
    ) -> impl Future<Output = FetchResult<()>> + Send;
}

/// Release asset URL for a repository's Solana test artifacts
pub fn artifact_url(base_url: &str, version: &str) -> String {
    format!(
        "{}/releases/download/solana-artifacts-localtest-{}/artifacts.tar.gz",
        base_url.trim_end_matches('/'),
        version
    )
}

/// Downloads `artifacts.tar.gz` release assets over HTTP and unpacks the `.so` files
pub struct HttpArtifactDownloader {
    client: reqwest::Client,
    config: ArtifactsConfig,
}

impl HttpArtifactDownloader {
    pub fn new(config: ArtifactsConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("program-fixtures/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Http {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, config })
    }

    async fn fetch_once(&self, url: &str) -> FetchResult<Vec<u8>> {
        let http_err = |e: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(http_err)?;
        Ok(bytes.to_vec())
    }

    async fn fetch_with_retry(&self, url: &str, options: &DownloadOptions) -> FetchResult<Vec<u8>> {
        let mut backoff = Duration::from_millis(options.initial_backoff_ms);
        let mut retries = 0;

        loop {
            match execute_with_timeout(options.timeout_seconds, url, self.fetch_once(url)).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if is_retryable(&e) && retries < options.max_retries => {
                    retries += 1;
                    warn!(
                        "Download of {} failed (attempt {}/{}), retrying in {:?}: {}",
                        url,
                        retries,
                        options.max_retries + 1,
                        backoff,
                        e
                    );
                    sleep(backoff).await;
                    backoff = calculate_next_backoff(
                        backoff,
                        options.backoff_multiplier,
                        options.max_backoff_seconds,
                    );
                }
                Err(e) if retries > 0 && is_retryable(&e) => {
                    error!("Giving up on {} after {} retries: {}", url, retries, e);
                    return Err(FetchError::MaxRetriesExceeded {
                        operation: format!("download {}: {}", url, e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl ArtifactDownloader for HttpArtifactDownloader {
    async fn download(
        &self,
        repository: SourceRepository,
        destination: &Path,
        version: &str,
        options: &DownloadOptions,
    ) -> FetchResult<()> {
        let configured = self.config.repository(repository);
        let version = if version.is_empty() {
            configured.version.as_str()
        } else {
            version
        };
        if version.is_empty() {
            return Err(FetchError::MissingVersion {
                repository: repository.to_string(),
            });
        }

        let url = artifact_url(&configured.base_url, version);
        info!("Downloading {} program artifacts from {}", repository, url);

        let archive = self.fetch_with_retry(&url, options).await?;
        info!(
            "Downloaded {} bytes (sha256 {})",
            archive.len(),
            hex::encode(Sha256::digest(&archive))
        );

        let destination = destination.to_path_buf();
        let extracted = tokio::task::spawn_blocking(move || extract_programs(&archive, &destination))
            .await
            .map_err(|e| FetchError::Io(format!("extraction task failed: {}", e)))??;

        info!("Extracted {} {} program artifacts", extracted, repository);
        Ok(())
    }
}

/// Unpack every `.so` entry of a gzipped tarball into `destination`
///
/// Entries are flattened to their file name. Returns the number of programs written.
pub fn extract_programs(archive: &[u8], destination: &Path) -> FetchResult<usize> {
    let archive_err = |e: std::io::Error| FetchError::Archive(e.to_string());

    std::fs::create_dir_all(destination)?;
    let mut tarball = tar::Archive::new(GzDecoder::new(archive));
    let mut count = 0;

    for entry in tarball.entries().map_err(archive_err)? {
        let mut entry = entry.map_err(archive_err)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path().map_err(archive_err)?.into_owned();
        if path.extension().and_then(|ext| ext.to_str()) != Some(ARTIFACT_EXTENSION) {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        let target = destination.join(file_name);
        entry.unpack(&target).map_err(archive_err)?;
        debug!("Unpacked {}", target.display());
        count += 1;
    }

    Ok(count)
}
