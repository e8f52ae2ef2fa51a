//! `dbops-provisioner` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod cli;
pub mod error;
pub mod provision;
pub mod server;
