use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Element type the host uses for map frames on a layout
pub const MAPFRAME_ELEMENT: &str = "MAPFRAME_ELEMENT";

/// Handle to a layout inside a project container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutId(pub usize);

/// Handle to a map inside a project container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapId(pub usize);

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout#{}", self.0)
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

/// Port for the host's project container (layouts and maps)
pub trait ProjectContainer {
    /// Path of the project file, or the `CURRENT` sentinel
    fn file_path(&self) -> &str;

    /// Import a legacy document, returning the layout it produced
    fn import_document(&mut self, path: &str) -> Result<LayoutId>;

    /// Current name of a layout
    fn layout_name(&self, layout: LayoutId) -> Result<String>;

    /// Rename a layout. Returns the name the host actually applied, which
    /// may carry a disambiguator when the requested name is taken.
    fn set_layout_name(&mut self, layout: LayoutId, name: &str) -> Result<String>;

    /// Maps referenced by the layout's map-frame elements, in element order
    fn map_frames(&self, layout: LayoutId) -> Result<Vec<MapId>>;

    /// Current name of a map
    fn map_name(&self, map: MapId) -> Result<String>;

    /// Rename a map, returning the applied name
    fn set_map_name(&mut self, map: MapId, name: &str) -> Result<String>;

    /// Persist the container
    fn save(&mut self) -> Result<()>;
}
