//! gdbkit host - host toolkit adapters
//!
//! This crate provides adapter implementations of the core ports:
//! an in-memory project container and geodatabase catalog, loaded from a
//! JSON snapshot of the host's documents and geodatabases.

pub mod memory;
pub mod snapshot;

pub use memory::{MemoryCatalog, MemoryProject, MemoryWorkspace};
pub use snapshot::{CatalogItem, DocumentSnapshot, GeodatabaseSnapshot, HostSnapshot, ProjectFile};
