//! `dbops-core` -- pure domain logic shared by the provisioner and the
//! idle-instance stopper.
//!
//! Nothing in this crate talks to a database server or a cloud API; the
//! binaries fetch data and pass it in.

pub mod eligibility;
pub mod error;
pub mod instance;
pub mod naming;
pub mod summary;
pub mod tags;
