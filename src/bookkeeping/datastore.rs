use crate::bookkeeping::types::{ContractType, Version};
use crate::errors::{BookkeepingError, BookkeepingResult};
use serde::{Deserialize, Serialize};

/// A deployed contract reference in the datastore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRef {
    pub address: String,
    pub chain_selector: u64,
    pub contract_type: ContractType,
    pub version: Version,
    /// Distinguishes several deployments of the same type and version
    pub qualifier: String,
    pub labels: Vec<String>,
}

impl AddressRef {
    pub fn new(
        address: impl Into<String>,
        chain_selector: u64,
        contract_type: ContractType,
        version: Version,
    ) -> Self {
        Self {
            address: address.into(),
            chain_selector,
            contract_type,
            version,
            qualifier: String::new(),
            labels: Vec::new(),
        }
    }

    pub fn key(&self) -> AddressRefKey {
        AddressRefKey {
            chain_selector: self.chain_selector,
            contract_type: self.contract_type,
            version: self.version.clone(),
            qualifier: self.qualifier.clone(),
        }
    }
}

/// Uniqueness key of an [`AddressRef`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressRefKey {
    pub chain_selector: u64,
    pub contract_type: ContractType,
    pub version: Version,
    pub qualifier: String,
}

/// Insert-only store of address references
///
/// Rejects a record whose key is already present, and a record that puts an
/// already-registered address on the same chain under a different identity.
#[derive(Debug, Default, Clone)]
pub struct AddressRefStore {
    refs: Vec<AddressRef>,
}

impl AddressRefStore {
    pub fn add(&mut self, record: AddressRef) -> BookkeepingResult<()> {
        if record.address.is_empty() {
            return Err(BookkeepingError::EmptyAddress);
        }

        let key = record.key();
        if self.refs.iter().any(|r| r.key() == key) {
            return Err(BookkeepingError::AddressRefExists {
                chain_selector: key.chain_selector,
                contract_type: key.contract_type.to_string(),
                version: key.version.to_string(),
            });
        }

        if let Some(existing) = self
            .refs
            .iter()
            .find(|r| r.chain_selector == record.chain_selector && r.address == record.address)
        {
            return Err(BookkeepingError::AddressConflict {
                chain_selector: record.chain_selector,
                address: record.address,
                existing: format!("{} {}", existing.contract_type, existing.version),
            });
        }

        self.refs.push(record);
        Ok(())
    }

    pub fn get(&self, key: &AddressRefKey) -> Option<&AddressRef> {
        self.refs.iter().find(|r| &r.key() == key)
    }

    /// All references for a chain, in insertion order
    pub fn for_chain(&self, chain_selector: u64) -> Vec<&AddressRef> {
        self.refs
            .iter()
            .filter(|r| r.chain_selector == chain_selector)
            .collect()
    }

    pub fn fetch(&self) -> &[AddressRef] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// In-memory datastore
#[derive(Debug, Default, Clone)]
pub struct MemoryDataStore {
    pub address_ref_store: AddressRefStore,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}
