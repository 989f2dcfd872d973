use crate::artifacts::cache::ArtifactCache;
use crate::artifacts::download::ArtifactDownloader;
use crate::artifacts::ARTIFACT_EXTENSION;
use crate::bookkeeping::{preload_address_book_with_mcms_programs, MemoryAddressBook};
use crate::errors::{AppError, AppResult};
use crate::programs::{
    directory, ProgramGroup, ProgramIds, SourceRepository, DATA_FEEDS_PROGRAM_NAMES, KEYSTONE_PROGRAM_NAMES,
    MCMS_PROGRAM_NAMES,
};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Copies cached program artifacts into per-test directories
///
/// Cloning is cheap; clones share one [`ArtifactCache`], so the download
/// guarantee holds across every test that uses them.
pub struct ArtifactProvisioner<D> {
    cache: Arc<ArtifactCache<D>>,
}

impl<D> Clone for ArtifactProvisioner<D> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<D: ArtifactDownloader> ArtifactProvisioner<D> {
    pub fn new(cache: ArtifactCache<D>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    pub fn from_shared(cache: Arc<ArtifactCache<D>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ArtifactCache<D> {
        &self.cache
    }

    /// Copy `<name>.so` for every requested program into `destination`
    ///
    /// Returns the program IDs of exactly the requested names. Unknown names
    /// are rejected before anything is downloaded or copied. On error the
    /// destination may hold a partial set and should be discarded.
    pub async fn materialize(&self, names: &[&str], destination: &Path) -> AppResult<ProgramIds> {
        let mut by_repository: BTreeMap<SourceRepository, Vec<&str>> = BTreeMap::new();
        for &name in names {
            let entry = directory()
                .try_identity(name)
                .ok_or_else(|| AppError::UnknownProgram(name.to_string()))?;
            let programs = by_repository.entry(entry.repository).or_default();
            if !programs.contains(&name) {
                programs.push(name);
            }
        }

        let mut sources = Vec::with_capacity(by_repository.len());
        for (repository, programs) in by_repository {
            let cache_path = self.cache.ensure_cached(repository).await?;
            sources.push((cache_path, programs));
        }

        let mut copied = 0;
        for (cache_path, programs) in &sources {
            for name in programs {
                copy_artifact(cache_path, destination, name).await?;
                copied += 1;
            }
        }

        info!(
            "Materialised {} programs into {}",
            copied,
            destination.display()
        );
        Ok(directory().identities(names))
    }

    /// Load the MCMS program artifacts into `dir`
    pub async fn load_mcms_programs(&self, dir: &Path) -> AppResult<(PathBuf, ProgramIds)> {
        let ids = self.materialize(MCMS_PROGRAM_NAMES, dir).await?;
        Ok((dir.to_path_buf(), ids))
    }

    /// Load the Keystone and MCMS program artifacts into `dir`
    pub async fn load_keystone_programs(&self, dir: &Path) -> AppResult<ProgramIds> {
        self.materialize(&with_mcms(KEYSTONE_PROGRAM_NAMES), dir)
            .await
    }

    /// Load the Data Feeds and MCMS program artifacts into `dir`
    pub async fn load_data_feeds_programs(&self, dir: &Path) -> AppResult<ProgramIds> {
        self.materialize(&with_mcms(DATA_FEEDS_PROGRAM_NAMES), dir)
            .await
    }

    /// Load a program group, plus MCMS where the group depends on it
    pub async fn load_group(&self, group: ProgramGroup, dir: &Path) -> AppResult<ProgramIds> {
        match group {
            ProgramGroup::Mcms => Ok(self.load_mcms_programs(dir).await?.1),
            ProgramGroup::Keystone => self.load_keystone_programs(dir).await,
            ProgramGroup::DataFeeds => self.load_data_feeds_programs(dir).await,
        }
    }

    /// Fresh temporary directory with the MCMS programs plus a matching address book
    pub async fn preload_mcms(
        &self,
        chain_selector: u64,
    ) -> AppResult<(TempDir, ProgramIds, MemoryAddressBook)> {
        let dir = TempDir::new()?;
        let ids = self.materialize(MCMS_PROGRAM_NAMES, dir.path()).await?;
        let address_book = preload_address_book_with_mcms_programs(chain_selector)?;
        Ok((dir, ids, address_book))
    }
}

// MCMS always co-deploys with the product programs
fn with_mcms(names: &[&'static str]) -> Vec<&'static str> {
    names.iter().chain(MCMS_PROGRAM_NAMES).copied().collect()
}

fn materialize_error(program: &str, path: &Path) -> impl FnOnce(io::Error) -> AppError {
    let program = program.to_string();
    let path = path.to_path_buf();
    move |source| AppError::Materialize {
        program,
        path,
        source,
    }
}

async fn copy_artifact(cache_path: &Path, destination: &Path, name: &str) -> AppResult<u64> {
    let file_name = format!("{}.{}", name, ARTIFACT_EXTENSION);
    let src = cache_path.join(&file_name);
    let dst = destination.join(&file_name);

    let mut src_file = File::open(&src)
        .await
        .map_err(materialize_error(name, &src))?;
    let mut dst_file = File::create(&dst)
        .await
        .map_err(materialize_error(name, &dst))?;
    let bytes = tokio::io::copy(&mut src_file, &mut dst_file)
        .await
        .map_err(materialize_error(name, &dst))?;
    dst_file
        .flush()
        .await
        .map_err(materialize_error(name, &dst))?;

    debug!("Copied {} ({} bytes) to {}", src.display(), bytes, dst.display());
    Ok(bytes)
}
