use crate::bookkeeping::address_book::MemoryAddressBook;
use crate::bookkeeping::datastore::{AddressRef, MemoryDataStore};
use crate::bookkeeping::types::{ContractType, TypeAndVersion, VERSION_1_0_0};
use crate::errors::BookkeepingResult;
use crate::programs::{directory, PROG_ACCESS_CONTROLLER, PROG_MCM, PROG_TIMELOCK};
use tracing::debug;

/// MCMS programs and the contract type each is registered under
pub const MCMS_CONTRACT_TYPES: [(&str, ContractType); 3] = [
    (PROG_MCM, ContractType::ManyChainMultisigProgram),
    (PROG_ACCESS_CONTROLLER, ContractType::AccessControllerProgram),
    (PROG_TIMELOCK, ContractType::RBACTimelockProgram),
];

/// Register the MCMS programs in the datastore for a chain selector
pub fn register_mcms_programs(chain_selector: u64, datastore: &mut MemoryDataStore) -> BookkeepingResult<()> {
    for (program, contract_type) in MCMS_CONTRACT_TYPES {
        datastore.address_ref_store.add(AddressRef::new(
            directory().identity(program).id,
            chain_selector,
            contract_type,
            VERSION_1_0_0,
        ))?;
    }
    debug!("Registered MCMS programs for chain {}", chain_selector);
    Ok(())
}

/// Address book holding the MCMS program addresses for a chain selector
pub fn preload_address_book_with_mcms_programs(chain_selector: u64) -> BookkeepingResult<MemoryAddressBook> {
    let mut book = MemoryAddressBook::new();
    for (program, contract_type) in MCMS_CONTRACT_TYPES {
        book.save(
            chain_selector,
            directory().identity(program).id,
            TypeAndVersion::new(contract_type, VERSION_1_0_0),
        )?;
    }
    Ok(book)
}
