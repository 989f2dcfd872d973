use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// Keystone programs
pub const PROG_KEYSTONE_FORWARDER: &str = "keystone_forwarder";

// Data Feeds programs
pub const PROG_DATA_FEEDS_CACHE: &str = "data_feeds_cache";

// MCMS programs
pub const PROG_MCM: &str = "mcm";
pub const PROG_TIMELOCK: &str = "timelock";
pub const PROG_ACCESS_CONTROLLER: &str = "access_controller";

/// Program names grouped by their usage
pub const MCMS_PROGRAM_NAMES: &[&str] = &[PROG_MCM, PROG_TIMELOCK, PROG_ACCESS_CONTROLLER];
pub const KEYSTONE_PROGRAM_NAMES: &[&str] = &[PROG_KEYSTONE_FORWARDER];
pub const DATA_FEEDS_PROGRAM_NAMES: &[&str] = &[PROG_DATA_FEEDS_CACHE];

/// Named groupings of programs that deploy together
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProgramGroup {
    Mcms,
    Keystone,
    DataFeeds,
}

impl ProgramGroup {
    /// Programs of the group itself, without the MCMS baseline
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            ProgramGroup::Mcms => MCMS_PROGRAM_NAMES,
            ProgramGroup::Keystone => KEYSTONE_PROGRAM_NAMES,
            ProgramGroup::DataFeeds => DATA_FEEDS_PROGRAM_NAMES,
        }
    }
}

/// Mapping from logical program name to program ID
pub type ProgramIds = BTreeMap<String, String>;

/// Repositories that publish program artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SourceRepository {
    /// chainlink-ccip; its artifacts also carry the MCMS programs
    ChainlinkCcip,
    ChainlinkSolana,
}

impl SourceRepository {
    pub const ALL: [SourceRepository; 2] = [
        SourceRepository::ChainlinkCcip,
        SourceRepository::ChainlinkSolana,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceRepository::ChainlinkCcip => "chainlink-ccip",
            SourceRepository::ChainlinkSolana => "chainlink-solana",
        }
    }
}

impl fmt::Display for SourceRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceRepository {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ccip" | "chainlink-ccip" => Ok(SourceRepository::ChainlinkCcip),
            "solana" | "chainlink-solana" => Ok(SourceRepository::ChainlinkSolana),
            other => Err(format!("unknown repository: {}", other)),
        }
    }
}

/// Identity of a deployed program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramEntry {
    /// Program ID (base58 public key)
    pub id: &'static str,
    /// Repository whose artifacts contain the program binary
    pub repository: SourceRepository,
}

/// Read-only mapping from logical program name to program identity
#[derive(Debug)]
pub struct ProgramDirectory {
    entries: HashMap<&'static str, ProgramEntry>,
}

lazy_static! {
    static ref DIRECTORY: ProgramDirectory = ProgramDirectory::new(&[
        // MCMS programs
        (PROG_MCM, "5vNJx78mz7KVMjhuipyr9jKBKcMrKYGdjGkgE4LUmjKk", SourceRepository::ChainlinkCcip),
        (PROG_TIMELOCK, "DoajfR5tK24xVw51fWcawUZWhAXD8yrBJVacc13neVQA", SourceRepository::ChainlinkCcip),
        (PROG_ACCESS_CONTROLLER, "6KsN58MTnRQ8FfPaXHiFPPFGDRioikj9CdPvPxZJdCjb", SourceRepository::ChainlinkCcip),
        // Keystone programs
        (PROG_KEYSTONE_FORWARDER, "whV7Q5pi17hPPyaPksToDw1nMx6Lh8qmNWKFaLRQ4wz", SourceRepository::ChainlinkSolana),
        // Data Feeds programs
        (PROG_DATA_FEEDS_CACHE, "3kX63udXtYcsdj2737Wi2KGd2PhqiKPgAFAxstrjtRUa", SourceRepository::ChainlinkSolana),
    ]);
}

/// The program directory, source of truth for program IDs and repositories
pub fn directory() -> &'static ProgramDirectory {
    &DIRECTORY
}

impl ProgramDirectory {
    fn new(table: &[(&'static str, &'static str, SourceRepository)]) -> Self {
        let entries = table
            .iter()
            .map(|&(name, id, repository)| (name, ProgramEntry { id, repository }))
            .collect();
        Self { entries }
    }

    /// Look up a program by logical name
    ///
    /// # Panics
    /// Panics if `name` is not in the directory. The table is compiled in, so
    /// an unknown name is a programming error.
    pub fn identity(&self, name: &str) -> ProgramEntry {
        match self.try_identity(name) {
            Some(entry) => entry,
            None => panic!("program {:?} is not in the program directory", name),
        }
    }

    pub fn try_identity(&self, name: &str) -> Option<ProgramEntry> {
        self.entries.get(name).copied()
    }

    /// Program IDs for the given names
    ///
    /// # Panics
    /// Panics on any name missing from the directory.
    pub fn identities(&self, names: &[&str]) -> ProgramIds {
        names
            .iter()
            .map(|name| (name.to_string(), self.identity(name).id.to_string()))
            .collect()
    }

    /// All known logical names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
