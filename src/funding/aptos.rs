use crate::errors::{FundingError, FundingResult};
use crate::funding::{http_client, ChainFamily, FundingProvider};
use tracing::debug;

pub const OCTAS_PER_APT: u64 = 100_000_000;

/// Funds Aptos accounts through a faucet's `/mint` endpoint
pub struct AptosFaucetProvider {
    client: reqwest::Client,
    faucet_url: String,
}

impl AptosFaucetProvider {
    pub fn new(faucet_url: impl Into<String>, timeout_seconds: u64) -> FundingResult<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            faucet_url: faucet_url.into(),
        })
    }
}

impl FundingProvider for AptosFaucetProvider {
    fn family(&self) -> ChainFamily {
        ChainFamily::Aptos
    }

    async fn fund_address(&self, address: &str, amount: u64) -> FundingResult<()> {
        let url = format!("{}/mint", self.faucet_url.trim_end_matches('/'));
        let amount = amount.to_string();
        let response = self
            .client
            .post(&url)
            .query(&[("amount", amount.as_str()), ("address", address)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FundingError::Rejected {
                url,
                status: status.as_u16(),
            });
        }

        debug!("Minted {} octas to {}", amount, address);
        Ok(())
    }
}
