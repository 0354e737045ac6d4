//! Resolving a batch selection into legacy document paths

use std::fs;
use std::path::Path;

use crate::error::{GdbkitError, Result};
use crate::models::{BatchMode, LegacyDocumentRef, UnknownModePolicy};
use crate::paths;

/// Split a host-style quoted list (`'a';'b'`) into its entries.
///
/// Every single quote is removed and empty entries are dropped.
pub fn parse_path_list(text: &str) -> Vec<String> {
    text.split(';')
        .map(|segment| segment.replace('\'', ""))
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

/// Resolve a batch into document references.
///
/// `mode` is the raw mode string. An unrecognised mode is an error under
/// [`UnknownModePolicy::Reject`] and an empty batch under
/// [`UnknownModePolicy::Ignore`].
pub fn resolve_sources(
    mode: &str,
    directory: Option<&str>,
    file_list: Option<&str>,
    extension: &str,
    policy: UnknownModePolicy,
) -> Result<Vec<LegacyDocumentRef>> {
    let Some(mode) = BatchMode::parse(mode) else {
        return match policy {
            UnknownModePolicy::Reject => Err(GdbkitError::InvalidBatchMode {
                mode: mode.to_string(),
            }),
            UnknownModePolicy::Ignore => {
                tracing::warn!("Unrecognised batch mode '{}'; nothing to import", mode);
                Ok(Vec::new())
            }
        };
    };

    match mode {
        BatchMode::Folder => {
            let directory = directory.ok_or_else(|| GdbkitError::ConfigMissing {
                key: "directory".to_string(),
            })?;
            scan_folder(directory, extension)
        }
        BatchMode::File => {
            let file_list = file_list.ok_or_else(|| GdbkitError::ConfigMissing {
                key: "files".to_string(),
            })?;
            Ok(parse_path_list(file_list)
                .into_iter()
                .map(LegacyDocumentRef::new)
                .collect())
        }
    }
}

/// Entries directly under `directory` whose name ends with `.<extension>`.
///
/// Order follows the filesystem listing.
pub fn scan_folder(directory: &str, extension: &str) -> Result<Vec<LegacyDocumentRef>> {
    let dir_path = Path::new(directory);
    if !dir_path.is_dir() {
        return Err(GdbkitError::DirectoryNotFound {
            path: dir_path.to_path_buf(),
        });
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut documents = Vec::new();

    for entry in fs::read_dir(dir_path)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!("Skipping non UTF-8 entry in {}", directory);
            continue;
        };
        if name.ends_with(&suffix) {
            documents.push(LegacyDocumentRef::new(paths::join(directory, name)));
        }
    }

    tracing::debug!("Found {} legacy documents in {}", documents.len(), directory);
    Ok(documents)
}
