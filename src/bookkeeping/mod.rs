//! Address bookkeeping for deployment tests
//!
//! - **Datastore** - Address references keyed by chain, type, version and qualifier
//! - **Address book** - The legacy chain → address → type-and-version map
//! - **Preload** - Seeding either store with the MCMS program identities
//! - **State** - Handing a chain's registered addresses to a state loader

pub mod address_book;
pub mod datastore;
pub mod preload;
pub mod state;
pub mod types;

pub use address_book::{ChainAddresses, MemoryAddressBook};
pub use datastore::{AddressRef, AddressRefKey, AddressRefStore, MemoryDataStore};
pub use preload::{preload_address_book_with_mcms_programs, register_mcms_programs, MCMS_CONTRACT_TYPES};
pub use state::{mcms_state_from_address_book, McmsProgramIds, McmsProgramResolver, McmsStateLoader, SolanaChain};
pub use types::{ContractType, TypeAndVersion, Version, VERSION_1_0_0};
