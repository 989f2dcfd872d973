use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::programs::SourceRepository;

/// Fixture configuration loaded from fixtures.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesConfig {
    pub artifacts: ArtifactsConfig,
    pub funding: FundingConfig,
}

/// Where a repository publishes its compiled program artifacts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Repository URL, e.g. `https://github.com/smartcontractkit/chainlink-ccip`
    pub base_url: String,
    /// Release version (commit SHA) used when the caller gives no hint
    pub version: String,
}

/// Artifact download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    pub ccip: RepositoryConfig,
    pub solana: RepositoryConfig,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl ArtifactsConfig {
    pub fn repository(&self, repository: SourceRepository) -> &RepositoryConfig {
        match repository {
            SourceRepository::ChainlinkCcip => &self.ccip,
            SourceRepository::ChainlinkSolana => &self.solana,
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            ccip: RepositoryConfig {
                base_url: "https://github.com/smartcontractkit/chainlink-ccip".to_string(),
                version: String::new(),
            },
            solana: RepositoryConfig {
                base_url: "https://github.com/smartcontractkit/chainlink-solana".to_string(),
                version: String::new(),
            },
            timeout_seconds: 300,
            max_retries: 3,
            initial_backoff_ms: 500,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 30,
        }
    }
}

/// Amounts used when funding test nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingConfig {
    /// 1000 SOL
    pub solana_airdrop_lamports: u64,
    /// 100 APT
    pub aptos_fund_octas: u64,
    pub timeout_seconds: u64,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            solana_airdrop_lamports: 1_000 * 1_000_000_000,
            aptos_fund_octas: 100 * 100_000_000,
            timeout_seconds: 30,
        }
    }
}

impl FixturesConfig {
    /// Load configuration from fixtures.toml and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let artifacts = ArtifactsConfig::default();
        let funding = FundingConfig::default();
        let config = Config::builder()
            .set_default("artifacts.ccip.base_url", artifacts.ccip.base_url)?
            .set_default("artifacts.ccip.version", artifacts.ccip.version)?
            .set_default("artifacts.solana.base_url", artifacts.solana.base_url)?
            .set_default("artifacts.solana.version", artifacts.solana.version)?
            .set_default("artifacts.timeout_seconds", artifacts.timeout_seconds)?
            .set_default("artifacts.max_retries", artifacts.max_retries as i64)?
            .set_default("artifacts.initial_backoff_ms", artifacts.initial_backoff_ms)?
            .set_default("artifacts.backoff_multiplier", artifacts.backoff_multiplier)?
            .set_default(
                "artifacts.max_backoff_seconds",
                artifacts.max_backoff_seconds,
            )?
            .set_default(
                "funding.solana_airdrop_lamports",
                funding.solana_airdrop_lamports,
            )?
            .set_default("funding.aptos_fund_octas", funding.aptos_fund_octas)?
            .set_default("funding.timeout_seconds", funding.timeout_seconds)?
            // Load from fixtures.toml if it exists
            .add_source(File::with_name("fixtures").required(false))
            // PROGRAM_FIXTURES__ARTIFACTS__CCIP__VERSION=<sha> overrides artifacts.ccip.version
            .add_source(
                config::Environment::with_prefix("PROGRAM_FIXTURES")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration, falling back to built-in defaults on any error
    pub fn get_defaults() -> Self {
        Self::load().unwrap_or_else(|_| Self {
            artifacts: ArtifactsConfig::default(),
            funding: FundingConfig::default(),
        })
    }
}
