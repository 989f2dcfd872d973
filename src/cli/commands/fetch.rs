use crate::errors::AppResult;
use crate::programs::SourceRepository;
use clap::Args;
use futures::future::try_join_all;
use tracing::info;

/// Download program artifacts into the local cache
#[derive(Args)]
pub struct FetchCommand {
    /// Repository to fetch (ccip or solana); all repositories when omitted
    #[arg(long)]
    pub repo: Option<SourceRepository>,

    /// Release version (commit SHA), overrides the configured version
    #[arg(long, requires = "repo")]
    pub version: Option<String>,
}

impl FetchCommand {
    pub async fn run(&self) -> AppResult<()> {
        let mut cache = super::default_cache()?;
        if let (Some(repo), Some(version)) = (self.repo, &self.version) {
            cache = cache.with_version(repo, version.clone());
        }

        let repositories = match self.repo {
            Some(repo) => vec![repo],
            None => SourceRepository::ALL.to_vec(),
        };

        let cache = &cache;
        let paths = try_join_all(repositories.iter().map(move |repo| cache.ensure_cached(*repo))).await?;

        for (repo, path) in repositories.iter().zip(&paths) {
            info!("{} artifacts ready", repo);
            println!("{}\t{}", repo, path.display());
        }
        Ok(())
    }
}
