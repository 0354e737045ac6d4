//! Port trait definitions
//!
//! These traits define the interfaces the host toolkit adapters must implement.

pub mod geodatabase;
pub mod project;

pub use geodatabase::{GeodatabaseHost, Workspace};
pub use project::{LayoutId, MapId, ProjectContainer, MAPFRAME_ELEMENT};
