//! Solana program fixtures for deployment integration tests
//!
//! Downloads compiled program artifacts once per process, copies them into
//! per-test directories, and preloads address books with their program IDs.

pub mod artifacts;
pub mod bookkeeping;
pub mod cli;
pub mod config;
pub mod errors;
pub mod funding;
pub mod programs;
