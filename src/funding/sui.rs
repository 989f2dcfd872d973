use crate::errors::{FundingError, FundingResult};
use crate::funding::{http_client, ChainFamily, FundingProvider};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct FaucetRequest<'a> {
    fixed_amount_request: FixedAmountRequest<'a>,
}

#[derive(Debug, Serialize)]
struct FixedAmountRequest<'a> {
    recipient: &'a str,
}

/// Funds Sui accounts through a faucet's `/gas` endpoint
///
/// The faucet dispenses a fixed amount, so the requested amount is ignored.
pub struct SuiFaucetProvider {
    client: reqwest::Client,
    faucet_url: String,
}

impl SuiFaucetProvider {
    pub fn new(faucet_url: impl Into<String>, timeout_seconds: u64) -> FundingResult<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            faucet_url: faucet_url.into(),
        })
    }
}

impl FundingProvider for SuiFaucetProvider {
    fn family(&self) -> ChainFamily {
        ChainFamily::Sui
    }

    async fn fund_address(&self, address: &str, _amount: u64) -> FundingResult<()> {
        let url = format!("{}/gas", self.faucet_url.trim_end_matches('/'));
        let request = FaucetRequest {
            fixed_amount_request: FixedAmountRequest { recipient: address },
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FundingError::Rejected {
                url,
                status: status.as_u16(),
            });
        }

        info!("Address {} is funded", address);
        Ok(())
    }
}
