//! Importing legacy documents and renaming what they produce

use serde::Serialize;

use crate::error::Result;
use crate::models::{LegacyDocumentRef, ProjectTarget};
use crate::naming::SuffixDeriver;
use crate::ports::{LayoutId, MapId, ProjectContainer};

/// A single name change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameEvent {
    pub before: String,
    pub after: String,
}

/// What happened to one legacy document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub document: String,
    pub layout: RenameEvent,
    pub maps: Vec<RenameEvent>,
}

/// Result of the final save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    /// The open project is left for the user to save
    SkippedCurrent,
    /// Save failed; the batch still counts as complete
    Failed(String),
}

/// Summary of a conversion batch
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    pub project: String,
    pub documents: Vec<DocumentOutcome>,
    pub save: SaveOutcome,
}

impl ConvertSummary {
    pub fn map_count(&self) -> usize {
        self.documents.iter().map(|d| d.maps.len()).sum()
    }
}

/// Rename a freshly imported layout to `"<name> (<parent>--<file>)"`
pub fn rename_layout<P: ProjectContainer + ?Sized>(
    project: &mut P,
    layout: LayoutId,
    document_path: &str,
    deriver: &SuffixDeriver,
) -> Result<RenameEvent> {
    let before = project.layout_name(layout)?;
    tracing::info!("Old Layout Name: {}", before);

    let requested = deriver.rename(&before, document_path, None);
    let after = project.set_layout_name(layout, &requested)?;
    tracing::info!("Updated Layout Name: {}", after);

    Ok(RenameEvent { before, after })
}

/// Rename every map of a layout, carrying the layout name's disambiguator
pub fn rename_maps<P: ProjectContainer + ?Sized>(
    project: &mut P,
    maps: &[MapId],
    document_path: &str,
    layout_name: &str,
    deriver: &SuffixDeriver,
) -> Result<Vec<RenameEvent>> {
    let mut events = Vec::with_capacity(maps.len());

    for &map in maps {
        let before = project.map_name(map)?;
        tracing::info!("Old Map Name: {}", before);

        let requested = deriver.rename(&before, document_path, Some(layout_name));
        let after = project.set_map_name(map, &requested)?;
        tracing::info!("Updated Map Name: {}", after);

        events.push(RenameEvent { before, after });
    }

    Ok(events)
}

/// Import one legacy document and rename its layout and maps
pub fn convert_document<P: ProjectContainer + ?Sized>(
    project: &mut P,
    document: &LegacyDocumentRef,
    deriver: &SuffixDeriver,
) -> Result<DocumentOutcome> {
    tracing::info!("Legacy document: {}", document);
    let layout_id = project.import_document(&document.path)?;

    tracing::debug!("Renaming layout");
    let layout = rename_layout(project, layout_id, &document.path, deriver)?;

    let maps = project.map_frames(layout_id)?;
    tracing::debug!("Renaming maps ({})", maps.len());
    let maps = rename_maps(project, &maps, &document.path, &layout.after, deriver)?;

    Ok(DocumentOutcome {
        document: document.path.clone(),
        layout,
        maps,
    })
}

/// Save the project unless it is the host's open project.
///
/// A failed save is reported, never propagated.
pub fn persist<P: ProjectContainer + ?Sized>(project: &mut P, target: &ProjectTarget) -> SaveOutcome {
    if target.is_current() {
        tracing::debug!("Operating on the current project; skipping save");
        return SaveOutcome::SkippedCurrent;
    }

    match project.save() {
        Ok(()) => SaveOutcome::Saved,
        Err(e) => {
            tracing::error!("Save failed; the project is probably open somewhere.\n{}", e);
            SaveOutcome::Failed(e.to_string())
        }
    }
}

/// Run a whole conversion batch.
///
/// Documents are processed in order; an import or rename failure stops the
/// batch. `on_document` is called after each document completes.
pub fn run_conversion<P, F>(
    project: &mut P,
    documents: &[LegacyDocumentRef],
    target: &ProjectTarget,
    deriver: &SuffixDeriver,
    mut on_document: F,
) -> Result<ConvertSummary>
where
    P: ProjectContainer + ?Sized,
    F: FnMut(&DocumentOutcome),
{
    tracing::info!("Project: {}", project.file_path());
    tracing::info!("Number of legacy documents: {}", documents.len());

    let mut outcomes = Vec::with_capacity(documents.len());
    for document in documents {
        let outcome = convert_document(project, document, deriver)?;
        on_document(&outcome);
        outcomes.push(outcome);
    }

    let save = persist(project, target);

    Ok(ConvertSummary {
        project: target.as_str().to_string(),
        documents: outcomes,
        save,
    })
}
