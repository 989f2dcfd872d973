//! Program directory
//!
//! The static table of known Solana programs: logical name, program ID and
//! the repository whose release artifacts contain the compiled `.so`.

pub mod directory;

pub use directory::{
    directory, ProgramDirectory, ProgramEntry, ProgramGroup, ProgramIds, SourceRepository,
    DATA_FEEDS_PROGRAM_NAMES, KEYSTONE_PROGRAM_NAMES, MCMS_PROGRAM_NAMES, PROG_ACCESS_CONTROLLER,
    PROG_DATA_FEEDS_CACHE, PROG_KEYSTONE_FORWARDER, PROG_MCM, PROG_TIMELOCK,
};
