use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Logical program name missing from the program directory
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    /// Artifact download or cache population
    #[error("Artifact fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Copying a cached artifact into a destination directory
    #[error("Failed to materialise {program} at {}: {source}", path.display())]
    Materialize {
        program: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Address book and datastore operations
    #[error("Bookkeeping error: {0}")]
    Bookkeeping(#[from] BookkeepingError),

    /// Node funding operations
    #[error("Funding error: {0}")]
    Funding(#[from] FundingError),

    /// On-chain state loading, reported by the state loader
    #[error("State load error: {0}")]
    StateLoad(String),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Artifact fetch error types
///
/// Cloneable so a single failed download can be reported to every caller
/// waiting on the same repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Neither a version hint nor a configured version was available
    #[error("No artifact version configured for {repository}")]
    MissingVersion { repository: String },

    /// Transport-level HTTP failure
    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {url}")]
    Timeout { timeout_seconds: u64, url: String },

    /// Retry limit exceeded for a download
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },

    /// Archive could not be decompressed or unpacked
    #[error("Invalid artifact archive: {0}")]
    Archive(String),

    /// Filesystem failure while populating the cache
    #[error("Cache I/O error: {0}")]
    Io(String),

    /// Downloader finished but an expected artifact is absent
    #[error("Artifact {artifact} missing from {repository} cache")]
    MissingArtifact {
        repository: String,
        artifact: String,
    },
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

/// Bookkeeping store error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookkeepingError {
    /// Datastore already holds a reference with the same key
    #[error("Address ref already exists: chain {chain_selector}, {contract_type} {version}")]
    AddressRefExists {
        chain_selector: u64,
        contract_type: String,
        version: String,
    },

    /// Same address already registered on the chain under another type
    #[error("Address {address} on chain {chain_selector} already registered as {existing}")]
    AddressConflict {
        chain_selector: u64,
        address: String,
        existing: String,
    },

    /// Address book already holds this address for the chain
    #[error("Address {address} already exists for chain {chain_selector}")]
    AddressExists { chain_selector: u64, address: String },

    /// Empty address supplied
    #[error("Address must not be empty")]
    EmptyAddress,

    /// No addresses recorded for the chain
    #[error("Chain not found: {0}")]
    ChainNotFound(u64),
}

/// Funding error types
#[derive(Error, Debug)]
pub enum FundingError {
    /// Node must hold exactly one key for the funded chain family
    #[error("Node {node} has {count} {family} keys, expected exactly 1")]
    KeyCount {
        node: String,
        family: String,
        count: usize,
    },

    /// Transport-level failure talking to a faucet or RPC endpoint
    #[error("Funding request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Faucet answered with a non-success status
    #[error("Faucet {url} rejected funding request: HTTP {status}")]
    Rejected { url: String, status: u16 },

    /// JSON-RPC error object returned by the chain node
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

/// Crate-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for artifact fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for bookkeeping store operations
pub type BookkeepingResult<T> = Result<T, BookkeepingError>;

/// Result type for funding operations
pub type FundingResult<T> = Result<T, FundingError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(format!("JSON error: {}", err))
    }
}
