use crate::artifacts::download::{ArtifactDownloader, DownloadOptions};
use crate::artifacts::ARTIFACT_EXTENSION;
use crate::errors::{FetchError, FetchResult};
use crate::programs::{directory, SourceRepository};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

/// Directory name of the artifact cache, next to this crate's manifest
pub const CACHE_DIR_NAME: &str = "programs_cache";

/// Completion flag written once a repository directory is fully populated
pub const COMPLETE_MARKER: &str = ".complete";

/// Default cache root, stable across test runs on the same checkout
pub fn programs_cache_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CACHE_DIR_NAME)
}

type Slot = Arc<OnceCell<FetchResult<PathBuf>>>;

/// Per-repository artifact cache with exactly-once population
///
/// The first `ensure_cached` call for a repository runs the downloader; every
/// concurrent or later call for that repository waits for and returns the same
/// outcome. A failed population stays failed for the lifetime of this object.
///
/// The guarantee is per instance. Two instances over the same root do not
/// coordinate and may wipe each other's directories, so share one instance per
/// root (wrap it in an `Arc`, or clone an [`ArtifactProvisioner`]).
///
/// [`ArtifactProvisioner`]: crate::artifacts::ArtifactProvisioner
pub struct ArtifactCache<D> {
    root: PathBuf,
    downloader: D,
    options: DownloadOptions,
    versions: HashMap<SourceRepository, String>,
    slots: Mutex<HashMap<SourceRepository, Slot>>,
    requests: AtomicU64,
    downloads: AtomicU64,
    disk_reuses: AtomicU64,
}

impl<D: ArtifactDownloader> ArtifactCache<D> {
    /// Create a cache rooted at [`programs_cache_path`]
    ///
    /// Build this once per process and share it; see the type-level docs.
    pub fn new(downloader: D, options: DownloadOptions) -> Self {
        Self::with_root(programs_cache_path(), downloader, options)
    }

    pub fn with_root(root: impl Into<PathBuf>, downloader: D, options: DownloadOptions) -> Self {
        Self {
            root: root.into(),
            downloader,
            options,
            versions: HashMap::new(),
            slots: Mutex::new(HashMap::new()),
            requests: AtomicU64::new(0),
            downloads: AtomicU64::new(0),
            disk_reuses: AtomicU64::new(0),
        }
    }

    /// Pin the version passed to the downloader for a repository
    pub fn with_version(mut self, repository: SourceRepository, version: impl Into<String>) -> Self {
        self.versions.insert(repository, version.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a repository's artifacts
    pub fn repository_path(&self, repository: SourceRepository) -> PathBuf {
        self.root.join(repository.name())
    }

    /// Ensure the repository's artifacts are on disk and return their directory
    pub async fn ensure_cached(&self, repository: SourceRepository) -> FetchResult<PathBuf> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot(repository);
        if slot.initialized() {
            debug!("Cache hit for {} artifacts", repository);
        }
        slot.get_or_init(|| self.populate(repository)).await.clone()
    }

    /// Outcome of the population attempt, if one has finished
    pub fn outcome(&self, repository: SourceRepository) -> Option<FetchResult<PathBuf>> {
        self.slot(repository).get().cloned()
    }

    /// Get cache statistics
    pub fn get_stats(&self) -> CacheStats {
        CacheStats {
            requests: self.requests.load(Ordering::Relaxed),
            downloads: self.downloads.load(Ordering::Relaxed),
            disk_reuses: self.disk_reuses.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, repository: SourceRepository) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(repository).or_default().clone()
    }

    async fn populate(&self, repository: SourceRepository) -> FetchResult<PathBuf> {
        let path = self.repository_path(repository);
        let marker = path.join(COMPLETE_MARKER);

        if marker.is_file() {
            match verify_programs(repository, &path) {
                Ok(()) => {
                    self.disk_reuses.fetch_add(1, Ordering::Relaxed);
                    info!("Reusing cached {} artifacts at {}", repository, path.display());
                    return Ok(path);
                }
                Err(e) => warn!("Completed {} cache is damaged: {}", repository, e),
            }
        }

        if path.exists() {
            warn!("Discarding incomplete {} cache at {}", repository, path.display());
            tokio::fs::remove_dir_all(&path).await?;
        }
        tokio::fs::create_dir_all(&path).await?;

        let version = self.versions.get(&repository).map(String::as_str).unwrap_or("");
        self.downloads.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = self
            .downloader
            .download(repository, &path, version, &self.options)
            .await
        {
            error!("Failed to populate {} artifact cache: {}", repository, e);
            return Err(e);
        }
        if let Err(e) = verify_programs(repository, &path) {
            error!("Downloaded {} artifacts are incomplete: {}", repository, e);
            return Err(e);
        }

        tokio::fs::write(&marker, format!("{} {}\n", repository, version)).await?;
        info!("Cached {} artifacts at {}", repository, path.display());
        Ok(path)
    }
}

/// Check that every program published by `repository` is present in `path`
fn verify_programs(repository: SourceRepository, path: &Path) -> FetchResult<()> {
    for name in directory().names() {
        if directory().identity(name).repository != repository {
            continue;
        }
        let artifact = format!("{}.{}", name, ARTIFACT_EXTENSION);
        if !path.join(&artifact).is_file() {
            return Err(FetchError::MissingArtifact {
                repository: repository.to_string(),
                artifact,
            });
        }
    }
    Ok(())
}

/// Cache usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// `ensure_cached` calls
    pub requests: u64,
    /// Downloader invocations
    pub downloads: u64,
    /// Populations satisfied by a completion flag from an earlier run
    pub disk_reuses: u64,
}

impl CacheStats {
    /// Requests answered without touching the downloader or the disk
    pub fn memo_hits(&self) -> u64 {
        self.requests
            .saturating_sub(self.downloads)
            .saturating_sub(self.disk_reuses)
    }
}
