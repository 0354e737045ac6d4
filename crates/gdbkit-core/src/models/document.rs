use serde::{Deserialize, Serialize};
use std::fmt;

use crate::paths;

/// Default legacy map-document extension (without the dot)
pub const LEGACY_EXTENSION: &str = "mxd";

/// Reference to a legacy map-document file awaiting import
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyDocumentRef {
    /// Path as given by the user or the directory listing
    pub path: String,
}

impl LegacyDocumentRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The last two path components (parent folder, file name), used for naming
    pub fn parent_segments(&self) -> Vec<&str> {
        paths::tail_segments(&self.path, 2)
    }

    /// File name component of the path
    pub fn file_name(&self) -> &str {
        paths::last_segment(&self.path)
    }
}

impl fmt::Display for LegacyDocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Batch selection mode for legacy documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchMode {
    /// Every matching entry directly under a directory
    Folder,
    /// An explicit semicolon-delimited list
    File,
}

impl BatchMode {
    /// Parse the host's mode string. Matching is exact, as the host passes it.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Folder" => Some(BatchMode::Folder),
            "File" => Some(BatchMode::File),
            _ => None,
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchMode::Folder => f.write_str("Folder"),
            BatchMode::File => f.write_str("File"),
        }
    }
}

/// What to do with a batch mode string that is neither `Folder` nor `File`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownModePolicy {
    /// Fail with a configuration error
    #[default]
    Reject,
    /// Produce an empty batch (legacy behavior)
    Ignore,
}

/// Which project container a conversion writes into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectTarget {
    /// The project currently open in the host; never saved by the tool
    Current,
    /// A project file that is saved in place at the end of the batch
    Path(String),
}

impl ProjectTarget {
    /// Sentinel the host uses for the open project
    pub const CURRENT: &'static str = "CURRENT";

    pub fn from_flag(use_current: bool, path: Option<String>) -> Option<Self> {
        if use_current {
            Some(ProjectTarget::Current)
        } else {
            path.map(ProjectTarget::Path)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectTarget::Current => Self::CURRENT,
            ProjectTarget::Path(p) => p,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, ProjectTarget::Current)
    }
}
