use crate::errors::{FundingError, FundingResult};
use crate::funding::{http_client, ChainFamily, FundingProvider};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Funds Solana accounts through the `requestAirdrop` JSON-RPC method
pub struct SolanaAirdropProvider {
    client: reqwest::Client,
    rpc_url: String,
}

impl SolanaAirdropProvider {
    pub fn new(rpc_url: impl Into<String>, timeout_seconds: u64) -> FundingResult<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            rpc_url: rpc_url.into(),
        })
    }
}

impl FundingProvider for SolanaAirdropProvider {
    fn family(&self) -> ChainFamily {
        ChainFamily::Solana
    }

    // Does not wait for confirmation; nodes take a while before transmitting
    async fn fund_address(&self, address: &str, amount: u64) -> FundingResult<()> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "requestAirdrop",
            "params": [address, amount, { "commitment": "confirmed" }],
        });

        let response = self.client.post(&self.rpc_url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FundingError::Rejected {
                url: self.rpc_url.clone(),
                status: status.as_u16(),
            });
        }

        let body: RpcResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(FundingError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        debug!(
            "Requested airdrop of {} lamports to {} (signature {})",
            amount,
            address,
            body.result.unwrap_or_default()
        );
        Ok(())
    }
}
