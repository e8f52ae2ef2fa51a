//! `dbops-stopper` library crate.
//!
//! Re-exports internal modules for integration testing. The function
//! runtime entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod handler;
pub mod rds;
pub mod stopper;
