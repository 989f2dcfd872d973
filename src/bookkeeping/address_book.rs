use crate::bookkeeping::types::TypeAndVersion;
use crate::errors::{BookkeepingError, BookkeepingResult};
use std::collections::BTreeMap;

/// Address → type-and-version entries of one chain
pub type ChainAddresses = BTreeMap<String, TypeAndVersion>;

/// In-memory address book keyed by chain selector, then address
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryAddressBook {
    addresses: BTreeMap<u64, ChainAddresses>,
}

impl MemoryAddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an address; an address already present on the chain is an error
    pub fn save(
        &mut self,
        chain_selector: u64,
        address: &str,
        type_and_version: TypeAndVersion,
    ) -> BookkeepingResult<()> {
        if address.is_empty() {
            return Err(BookkeepingError::EmptyAddress);
        }

        let chain = self.addresses.entry(chain_selector).or_default();
        if chain.contains_key(address) {
            return Err(BookkeepingError::AddressExists {
                chain_selector,
                address: address.to_string(),
            });
        }

        chain.insert(address.to_string(), type_and_version);
        Ok(())
    }

    pub fn addresses_for_chain(&self, chain_selector: u64) -> BookkeepingResult<&ChainAddresses> {
        self.addresses
            .get(&chain_selector)
            .ok_or(BookkeepingError::ChainNotFound(chain_selector))
    }

    pub fn addresses(&self) -> &BTreeMap<u64, ChainAddresses> {
        &self.addresses
    }
}
