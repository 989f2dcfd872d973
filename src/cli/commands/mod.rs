pub mod fetch;
pub mod list;
pub mod materialize;

use crate::artifacts::{ArtifactCache, DownloadOptions, HttpArtifactDownloader};
use crate::config::FixturesConfig;
use crate::errors::AppResult;

/// Artifact cache at the default location, configured from fixtures.toml and the environment
pub(crate) fn default_cache() -> AppResult<ArtifactCache<HttpArtifactDownloader>> {
    let config = FixturesConfig::load()?;
    let options = DownloadOptions::from(&config.artifacts);
    let downloader = HttpArtifactDownloader::new(config.artifacts)?;
    Ok(ArtifactCache::new(downloader, options))
}
