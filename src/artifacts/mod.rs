//! Program artifact provisioning
//!
//! This module provides:
//! - **Download** - The downloader contract and the HTTP release-asset downloader
//! - **Cache** - Once-per-process population of the on-disk artifact cache
//! - **Materialize** - Copying cached programs into per-test directories
//! - **Retry** - Exponential backoff and timeout helpers for downloads

pub mod cache;
pub mod download;
pub mod materialize;
pub mod retry;

/// File extension of compiled Solana programs
pub const ARTIFACT_EXTENSION: &str = "so";

pub use cache::{programs_cache_path, ArtifactCache, CacheStats};
pub use download::{artifact_url, ArtifactDownloader, DownloadOptions, HttpArtifactDownloader};
pub use materialize::ArtifactProvisioner;
pub use retry::{calculate_next_backoff, execute_with_timeout};
