use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract type tag recorded against a deployed address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractType {
    ManyChainMultisigProgram,
    AccessControllerProgram,
    RBACTimelockProgram,
    KeystoneForwarder,
    DataFeedsCache,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::ManyChainMultisigProgram => "ManyChainMultiSigProgram",
            ContractType::AccessControllerProgram => "AccessControllerProgram",
            ContractType::RBACTimelockProgram => "RBACTimelockProgram",
            ContractType::KeystoneForwarder => "KeystoneForwarder",
            ContractType::DataFeedsCache => "DataFeedsCache",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub use semver::Version;

/// Version every preloaded program is registered under
pub const VERSION_1_0_0: Version = Version::new(1, 0, 0);

/// Contract type paired with its version, as stored in an address book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeAndVersion {
    pub contract_type: ContractType,
    pub version: Version,
}

impl TypeAndVersion {
    pub fn new(contract_type: ContractType, version: Version) -> Self {
        Self {
            contract_type,
            version,
        }
    }
}

impl fmt::Display for TypeAndVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.contract_type, self.version)
    }
}
