//! gdbkit core - naming, inventory and report logic
//!
//! This crate holds the domain rules of the two batch tools and the port
//! traits the host toolkit adapters implement:
//!
//! - legacy document import with path-derived layout and map names
//! - geodatabase inventory shaped into a formatted spreadsheet report

pub mod config;
pub mod convert;
pub mod error;
pub mod inventory;
pub mod models;
pub mod naming;
pub mod paths;
pub mod ports;
pub mod report;
pub mod sources;

pub use error::{GdbkitError, Result};
