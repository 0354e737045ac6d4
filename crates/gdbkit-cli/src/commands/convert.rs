//! Convert command implementation

use crate::cli::ConvertArgs;
use crate::config_loader::load_config_with_overrides;
use crate::errors::{self, CliError};
use crate::output::OutputWriter;
use crate::progress::ConvertProgress;
use anyhow::{Context, Result};
use gdbkit_core::config::CliConfigOverrides;
use gdbkit_core::convert::{run_conversion, ConvertSummary, SaveOutcome};
use gdbkit_core::models::ProjectTarget;
use gdbkit_core::sources::resolve_sources;
use gdbkit_host::{HostSnapshot, MemoryProject};
use std::path::Path;
use tabled::Tabled;

#[derive(Tabled)]
struct DocumentRow {
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "Layout")]
    layout: String,
    #[tabled(rename = "Maps")]
    maps: String,
}

pub fn execute(args: ConvertArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            extension: args.extension.clone(),
            unknown_mode: args.unknown_mode,
            tail_policy: args.tail_policy,
            ..Default::default()
        },
    )?;

    let use_current =
        args.current || args.project.as_deref() == Some(ProjectTarget::CURRENT);
    let target = ProjectTarget::from_flag(use_current, args.project.clone()).ok_or_else(|| {
        CliError::new("No project selected")
            .with_suggestion("Pass --current to use the open project")
            .with_suggestion("Or pass --project <FILE>")
    })?;

    let snapshot = HostSnapshot::load(&args.host).map_err(|e| {
        errors::snapshot_unreadable(&args.host.display().to_string(), &e.to_string())
    })?;

    let documents = resolve_sources(
        &args.mode,
        args.directory.as_deref(),
        args.files.as_deref(),
        &config.extension.value,
        config.unknown_mode.value,
    )?;
    if documents.is_empty() {
        output.warning("No legacy documents to import");
    }

    let mut project = MemoryProject::for_target(&target, snapshot)
        .with_context(|| format!("Failed to open project {}", target.as_str()))?;

    let progress = ConvertProgress::new(documents.len(), output.is_json());
    let summary = run_conversion(
        &mut project,
        &documents,
        &target,
        &config.suffix_deriver(),
        |outcome| progress.document_done(outcome),
    )?;
    progress.finish(summary.documents.len());

    if output.is_json() {
        return output.result(&summary);
    }

    display_summary(&summary, output);
    Ok(())
}

fn display_summary(summary: &ConvertSummary, output: &OutputWriter) {
    output.section("Converted Documents");
    output.table(
        summary
            .documents
            .iter()
            .map(|outcome| DocumentRow {
                document: outcome.document.clone(),
                layout: outcome.layout.after.clone(),
                maps: outcome
                    .maps
                    .iter()
                    .map(|m| m.after.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect(),
    );

    output.kv("Project", &summary.project);
    output.kv("Documents", summary.documents.len());
    output.kv("Maps", summary.map_count());

    match &summary.save {
        SaveOutcome::Saved => output.success(format!("Project saved: {}", summary.project)),
        SaveOutcome::SkippedCurrent => {
            output.success("Conversion complete");
            output.info("The open project was not saved; save it in the host to keep the changes");
        }
        SaveOutcome::Failed(reason) => {
            output.warning(format!(
                "Project save failed; the project is probably open somewhere.\n{}",
                reason
            ));
            output.success("Conversion complete");
        }
    }
}
