//! In-memory host adapters for batch runs and testing.
//!
//! [`MemoryProject`] behaves like the host's project container: imports
//! create a layout plus its maps, and a name that is already taken gets a
//! counter appended. [`MemoryCatalog`] binds workspaces over geodatabase
//! snapshots.

use gdbkit_core::error::{GdbkitError, Result};
use gdbkit_core::models::{DataType, DescribeInfo, ProjectTarget};
use gdbkit_core::paths;
use gdbkit_core::ports::{
    GeodatabaseHost, LayoutId, MapId, ProjectContainer, Workspace, MAPFRAME_ELEMENT,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::snapshot::{
    CatalogItem, DocumentSnapshot, GeodatabaseSnapshot, HostSnapshot, LayoutEntry, ProjectFile,
};

#[derive(Debug, Clone)]
struct Element {
    kind: String,
    map: Option<MapId>,
}

#[derive(Debug, Clone)]
struct Layout {
    name: String,
    elements: Vec<Element>,
}

impl Layout {
    fn frames(&self) -> Vec<MapId> {
        self.elements
            .iter()
            .filter(|e| e.kind == MAPFRAME_ELEMENT)
            .filter_map(|e| e.map)
            .collect()
    }
}

fn map_frame(map: MapId) -> Element {
    Element {
        kind: MAPFRAME_ELEMENT.to_string(),
        map: Some(map),
    }
}

/// In-memory implementation of ProjectContainer
#[derive(Debug, Clone)]
pub struct MemoryProject {
    file_path: String,
    save_to: Option<PathBuf>,
    documents: HostSnapshot,
    layouts: Vec<Layout>,
    maps: Vec<String>,
}

impl MemoryProject {
    /// The host's open project. Saving is a no-op.
    pub fn current(documents: HostSnapshot) -> Self {
        Self {
            file_path: ProjectTarget::CURRENT.to_string(),
            save_to: None,
            documents,
            layouts: Vec::new(),
            maps: Vec::new(),
        }
    }

    /// Open the project file at `path`, keeping any layouts it already has
    pub fn open(path: impl Into<PathBuf>, documents: HostSnapshot) -> Result<Self> {
        let path = path.into();
        let existing = ProjectFile::load(&path)?;

        let mut project = Self {
            file_path: path.display().to_string(),
            save_to: Some(path),
            documents,
            layouts: Vec::new(),
            maps: Vec::new(),
        };

        for entry in existing.layouts {
            let elements: Vec<Element> = entry
                .maps
                .into_iter()
                .map(|name| map_frame(project.push_map(name)))
                .collect();
            project.layouts.push(Layout {
                name: entry.name,
                elements,
            });
        }

        tracing::debug!(
            "Opened project {} with {} layouts",
            project.file_path,
            project.layouts.len()
        );
        Ok(project)
    }

    /// Project for `target`: the open project, or the file at its path
    pub fn for_target(target: &ProjectTarget, documents: HostSnapshot) -> Result<Self> {
        match target {
            ProjectTarget::Current => Ok(Self::current(documents)),
            ProjectTarget::Path(path) => Self::open(path, documents),
        }
    }

    /// Layouts with their map names, in creation order
    pub fn to_project_file(&self) -> ProjectFile {
        ProjectFile {
            layouts: self
                .layouts
                .iter()
                .map(|layout| LayoutEntry {
                    name: layout.name.clone(),
                    maps: layout.frames().iter().map(|m| self.maps[m.0].clone()).collect(),
                })
                .collect(),
        }
    }

    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    fn push_map(&mut self, name: String) -> MapId {
        self.maps.push(name);
        MapId(self.maps.len() - 1)
    }

    fn layout(&self, id: LayoutId) -> Result<&Layout> {
        self.layouts.get(id.0).ok_or(GdbkitError::LayoutNotFound { id: id.0 })
    }

    fn unique_layout_name(&self, requested: &str, skip: Option<LayoutId>) -> String {
        let taken = |candidate: &str| {
            self.layouts
                .iter()
                .enumerate()
                .any(|(i, l)| Some(LayoutId(i)) != skip && l.name == candidate)
        };
        disambiguate(requested, taken)
    }

    fn unique_map_name(&self, requested: &str, skip: Option<MapId>) -> String {
        let taken = |candidate: &str| {
            self.maps
                .iter()
                .enumerate()
                .any(|(i, m)| Some(MapId(i)) != skip && m == candidate)
        };
        disambiguate(requested, taken)
    }
}

/// `requested`, or `requested` with the smallest counter that is free
fn disambiguate(requested: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(requested) {
        return requested.to_string();
    }
    let mut counter = 1usize;
    loop {
        let candidate = format!("{}{}", requested, counter);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

impl ProjectContainer for MemoryProject {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn import_document(&mut self, path: &str) -> Result<LayoutId> {
        let DocumentSnapshot {
            layout,
            maps,
            elements: other_elements,
        } =
            self.documents.document(path).cloned().ok_or_else(|| GdbkitError::ImportFailed {
                path: path.to_string(),
                reason: "no such legacy document".to_string(),
            })?;

        let mut elements: Vec<Element> = other_elements
            .into_iter()
            .map(|kind| Element { kind, map: None })
            .collect();
        for map in maps {
            let name = self.unique_map_name(&map, None);
            elements.push(map_frame(self.push_map(name)));
        }

        let name = self.unique_layout_name(&layout, None);
        self.layouts.push(Layout { name, elements });

        tracing::debug!("Imported {} into {}", path, self.file_path);
        Ok(LayoutId(self.layouts.len() - 1))
    }

    fn layout_name(&self, layout: LayoutId) -> Result<String> {
        Ok(self.layout(layout)?.name.clone())
    }

    fn set_layout_name(&mut self, layout: LayoutId, name: &str) -> Result<String> {
        self.layout(layout)?;
        let applied = self.unique_layout_name(name, Some(layout));
        self.layouts[layout.0].name = applied.clone();
        Ok(applied)
    }

    fn map_frames(&self, layout: LayoutId) -> Result<Vec<MapId>> {
        Ok(self.layout(layout)?.frames())
    }

    fn map_name(&self, map: MapId) -> Result<String> {
        self.maps.get(map.0).cloned().ok_or(GdbkitError::MapNotFound { id: map.0 })
    }

    fn set_map_name(&mut self, map: MapId, name: &str) -> Result<String> {
        if map.0 >= self.maps.len() {
            return Err(GdbkitError::MapNotFound { id: map.0 });
        }
        let applied = self.unique_map_name(name, Some(map));
        self.maps[map.0] = applied.clone();
        Ok(applied)
    }

    fn save(&mut self) -> Result<()> {
        match &self.save_to {
            Some(path) => self.to_project_file().save(path),
            None => {
                tracing::debug!("Project {} has no backing file", self.file_path);
                Ok(())
            }
        }
    }
}

/// In-memory implementation of GeodatabaseHost
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    geodatabases: BTreeMap<String, GeodatabaseSnapshot>,
    redirects: BTreeMap<String, String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog over every geodatabase in a snapshot
    pub fn from_snapshot(snapshot: &HostSnapshot) -> Self {
        Self {
            geodatabases: snapshot.geodatabases.clone(),
            redirects: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, path: impl Into<String>, geodatabase: GeodatabaseSnapshot) {
        self.geodatabases.insert(path.into(), geodatabase);
    }

    /// Make binding `requested` land on `bound` instead, the way a host with
    /// a stale environment setting would
    pub fn redirect(&mut self, requested: impl Into<String>, bound: impl Into<String>) {
        self.redirects.insert(requested.into(), bound.into());
    }
}

impl GeodatabaseHost for MemoryCatalog {
    type Workspace = MemoryWorkspace;

    fn bind(&self, path: &str) -> Result<MemoryWorkspace> {
        let bound = self.redirects.get(path).map(String::as_str).unwrap_or(path);
        let catalog = self.geodatabases.get(bound).ok_or_else(|| GdbkitError::GeodatabaseNotFound {
            path: bound.to_string(),
        })?;

        Ok(MemoryWorkspace {
            path: bound.to_string(),
            catalog: catalog.clone(),
        })
    }
}

/// Workspace handle over one geodatabase snapshot
#[derive(Debug, Clone)]
pub struct MemoryWorkspace {
    path: String,
    catalog: GeodatabaseSnapshot,
}

impl MemoryWorkspace {
    fn find(&self, relative: &[&str]) -> Option<(&CatalogItem, DataType)> {
        match relative {
            [name] => {
                let root = [
                    (&self.catalog.tables, DataType::Table),
                    (&self.catalog.rasters, DataType::RasterDataset),
                    (&self.catalog.feature_classes, DataType::FeatureClass),
                ];
                root.into_iter().find_map(|(items, listed_as)| {
                    items.iter().find(|item| item.name == *name).map(|item| (item, listed_as))
                })
            }
            [dataset, name] => self
                .catalog
                .feature_datasets
                .iter()
                .find(|fd| fd.name == *dataset)?
                .feature_classes
                .iter()
                .find(|item| item.name == *name)
                .map(|item| (item, DataType::FeatureClass)),
            _ => None,
        }
    }
}

fn names(items: &[CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.name.clone()).collect()
}

impl Workspace for MemoryWorkspace {
    fn path(&self) -> &str {
        &self.path
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        Ok(names(&self.catalog.tables))
    }

    fn list_rasters(&self) -> Result<Vec<String>> {
        Ok(names(&self.catalog.rasters))
    }

    fn list_feature_datasets(&self) -> Result<Vec<String>> {
        Ok(self.catalog.feature_datasets.iter().map(|fd| fd.name.clone()).collect())
    }

    fn list_feature_classes(&self, dataset: Option<&str>) -> Result<Vec<String>> {
        match dataset {
            None => Ok(names(&self.catalog.feature_classes)),
            Some(dataset) => self
                .catalog
                .feature_datasets
                .iter()
                .find(|fd| fd.name == dataset)
                .map(|fd| names(&fd.feature_classes))
                .ok_or_else(|| GdbkitError::Introspection {
                    item: paths::join(&self.path, dataset),
                    reason: "no such feature dataset".to_string(),
                }),
        }
    }

    fn describe(&self, item_path: &str) -> Result<DescribeInfo> {
        let introspection = |reason: &str| GdbkitError::Introspection {
            item: item_path.to_string(),
            reason: reason.to_string(),
        };

        let relative = item_path
            .strip_prefix(self.path.as_str())
            .ok_or_else(|| introspection("item is outside the bound workspace"))?;
        let segments = paths::segments(relative);

        let (item, listed_as) =
            self.find(&segments).ok_or_else(|| introspection("item does not exist"))?;
        if item.unreadable {
            return Err(introspection("describe failed"));
        }
        Ok(item.describe(listed_as))
    }
}
