use crate::bookkeeping::address_book::{ChainAddresses, MemoryAddressBook};
use crate::bookkeeping::types::ContractType;
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::future::Future;

/// Handle to a Solana chain under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaChain {
    pub selector: u64,
    pub rpc_url: String,
}

/// Loads on-chain MCMS/timelock state from a chain's registered addresses
pub trait McmsStateLoader: Send + Sync {
    type State;

    fn load(
        &self,
        chain: &SolanaChain,
        addresses: &ChainAddresses,
    ) -> impl Future<Output = AppResult<Self::State>> + Send;
}

/// Look up the chain's addresses in the book and hand them to the state loader
///
/// Errors from the loader are returned as-is.
pub async fn mcms_state_from_address_book<L: McmsStateLoader>(
    address_book: &MemoryAddressBook,
    chain: &SolanaChain,
    loader: &L,
) -> AppResult<L::State> {
    let addresses = address_book.addresses_for_chain(chain.selector)?;
    loader.load(chain, addresses).await
}

/// Program IDs of the three MCMS programs on one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McmsProgramIds {
    pub mcm: String,
    pub access_controller: String,
    pub timelock: String,
}

impl McmsProgramIds {
    /// Pick the MCMS programs out of a chain's address entries
    pub fn from_addresses(addresses: &ChainAddresses) -> AppResult<Self> {
        let find = |contract_type: ContractType| {
            addresses
                .iter()
                .find(|(_, tv)| tv.contract_type == contract_type)
                .map(|(address, _)| address.clone())
                .ok_or_else(|| AppError::StateLoad(format!("no {} address registered", contract_type)))
        };

        Ok(Self {
            mcm: find(ContractType::ManyChainMultisigProgram)?,
            access_controller: find(ContractType::AccessControllerProgram)?,
            timelock: find(ContractType::RBACTimelockProgram)?,
        })
    }
}

/// State loader that resolves program IDs only, without touching the chain
#[derive(Debug, Default, Clone, Copy)]
pub struct McmsProgramResolver;

impl McmsStateLoader for McmsProgramResolver {
    type State = McmsProgramIds;

    async fn load(&self, _chain: &SolanaChain, addresses: &ChainAddresses) -> AppResult<McmsProgramIds> {
        McmsProgramIds::from_addresses(addresses)
    }
}
