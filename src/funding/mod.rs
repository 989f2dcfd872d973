//! Funding test nodes on non-EVM chains
//!
//! One [`FundingProvider`] per chain family. A provider looks up the node's
//! single transmitter key for its family and asks the chain's faucet or RPC
//! endpoint to credit it.

pub mod aptos;
pub mod solana;
pub mod sui;

use crate::errors::{FundingError, FundingResult};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use tracing::info;

pub use aptos::AptosFaucetProvider;
pub use solana::SolanaAirdropProvider;
pub use sui::SuiFaucetProvider;

/// Chain families that carry per-node transmitter keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    Solana,
    Aptos,
    Sui,
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainFamily::Solana => "solana",
            ChainFamily::Aptos => "aptos",
            ChainFamily::Sui => "sui",
        };
        f.write_str(name)
    }
}

/// A node under test and the account addresses of its keys, per chain family
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    keys: HashMap<ChainFamily, Vec<String>>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: HashMap::new(),
        }
    }

    pub fn with_key(mut self, family: ChainFamily, address: impl Into<String>) -> Self {
        self.keys.entry(family).or_default().push(address.into());
        self
    }

    /// The node's transmitter address; nodes must hold exactly one key per family
    pub fn transmitter(&self, family: ChainFamily) -> FundingResult<&str> {
        match self.keys.get(&family).map(Vec::as_slice) {
            Some([address]) => Ok(address.as_str()),
            other => Err(FundingError::KeyCount {
                node: self.name.clone(),
                family: family.to_string(),
                count: other.map_or(0, <[String]>::len),
            }),
        }
    }
}

/// Credits accounts on one chain family
pub trait FundingProvider: Send + Sync {
    fn family(&self) -> ChainFamily;

    /// Credit `amount` base units to `address`
    fn fund_address(&self, address: &str, amount: u64) -> impl Future<Output = FundingResult<()>> + Send;

    /// Credit `amount` base units to the node's transmitter
    fn fund(&self, node: &Node, amount: u64) -> impl Future<Output = FundingResult<()>> + Send {
        async move {
            let address = node.transmitter(self.family())?;
            self.fund_address(address, amount).await
        }
    }
}

/// Fund every node in turn, stopping at the first failure
pub async fn fund_nodes<P: FundingProvider>(provider: &P, nodes: &[Node], amount: u64) -> FundingResult<()> {
    for node in nodes {
        provider.fund(node, amount).await?;
    }
    info!(
        "Funded {} nodes on {} with {} each",
        nodes.len(),
        provider.family(),
        amount
    );
    Ok(())
}

pub(crate) fn http_client(timeout_seconds: u64) -> FundingResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()?)
}
