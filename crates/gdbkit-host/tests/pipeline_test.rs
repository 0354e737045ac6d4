//! End-to-end tests of both batch pipelines over the in-memory host

use gdbkit_core::convert::{run_conversion, SaveOutcome};
use gdbkit_core::error::GdbkitError;
use gdbkit_core::inventory::{run_inventory, InventoryObserver, NoopObserver};
use gdbkit_core::models::{
    DataType, InventoryRecord, ProjectTarget, TimestampZones, UnknownModePolicy, NOT_APPLICABLE,
};
use gdbkit_core::naming::SuffixDeriver;
use gdbkit_core::report::{write_report, ReportLayout, ReportSheet};
use gdbkit_core::sources::resolve_sources;
use gdbkit_host::snapshot::FeatureDatasetSnapshot;
use gdbkit_host::{
    CatalogItem, DocumentSnapshot, GeodatabaseSnapshot, HostSnapshot, MemoryCatalog, MemoryProject,
    ProjectFile,
};
use std::fs;
use tempfile::TempDir;

fn document(layout: &str, maps: &[&str]) -> DocumentSnapshot {
    DocumentSnapshot {
        layout: layout.to_string(),
        maps: maps.iter().map(|m| m.to_string()).collect(),
        elements: vec!["TEXT_ELEMENT".to_string()],
    }
}

fn legacy_documents() -> HostSnapshot {
    let mut snapshot = HostSnapshot::default();
    snapshot
        .documents
        .insert("C:\\Maps\\West\\Roads.mxd".to_string(), document("Layout", &["Layers", "Inset"]));
    snapshot
        .documents
        .insert("C:\\Maps\\East\\Parks.mxd".to_string(), document("Layout", &["Layers"]));
    snapshot
}

fn city_gdb() -> GeodatabaseSnapshot {
    GeodatabaseSnapshot {
        tables: vec![CatalogItem::new("Owners").modified("2024-02-10T08:15:00.000000")],
        rasters: vec![CatalogItem::new("Elevation").spatial_reference(4326, "GCS_WGS_1984")],
        feature_datasets: vec![FeatureDatasetSnapshot {
            name: "Cadastre".to_string(),
            feature_classes: vec![CatalogItem::new("Parcels")
                .modified("2024-03-01T17:45:12.500000")
                .spatial_reference(2277, "NAD_1983_StatePlane_Texas_Central_FIPS_4203_Feet")],
        }],
        feature_classes: vec![CatalogItem::new("Hydrants")
            .modified("2023-12-31T23:59:59.000000")
            .spatial_reference(3857, "WGS_1984_Web_Mercator_Auxiliary_Sphere")],
    }
}

fn county_gdb() -> GeodatabaseSnapshot {
    GeodatabaseSnapshot {
        feature_classes: vec![CatalogItem::new("Boundary")
            .modified("2022-06-01T12:00:00.000000")
            .spatial_reference(4269, "GCS_North_American_1983")],
        ..Default::default()
    }
}

fn host() -> MemoryCatalog {
    let mut host = MemoryCatalog::new();
    host.insert("C:\\Data\\city.gdb", city_gdb());
    host.insert("C:\\Data\\county.gdb", county_gdb());
    host
}

#[derive(Default)]
struct Recorder {
    started: Vec<(String, usize)>,
    items: Vec<String>,
}

impl InventoryObserver for Recorder {
    fn geodatabase_started(&mut self, gdb_path: &str, item_count: usize) {
        self.started.push((gdb_path.to_string(), item_count));
    }

    fn item_done(&mut self, record: &InventoryRecord) {
        self.items.push(record.item_name.clone());
    }
}

#[test]
fn test_conversion_renames_and_saves() {
    let dir = TempDir::new().unwrap();
    let project_path = dir.path().join("project.json");
    let target = ProjectTarget::Path(project_path.display().to_string());

    let documents = resolve_sources(
        "File",
        None,
        Some("'C:\\Maps\\West\\Roads.mxd';'C:\\Maps\\East\\Parks.mxd'"),
        "mxd",
        UnknownModePolicy::Reject,
    )
    .unwrap();

    let mut project = MemoryProject::for_target(&target, legacy_documents()).unwrap();
    let mut seen = 0;
    let summary = run_conversion(
        &mut project,
        &documents,
        &target,
        &SuffixDeriver::default(),
        |_| seen += 1,
    )
    .unwrap();

    assert_eq!(seen, 2);
    assert_eq!(summary.save, SaveOutcome::Saved);
    assert_eq!(summary.map_count(), 3);

    let saved = ProjectFile::load(&project_path).unwrap();
    let names: Vec<(&str, Vec<&str>)> = saved
        .layouts
        .iter()
        .map(|l| (l.name.as_str(), l.maps.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(
        names,
        vec![
            (
                "Layout (West--Roads.mxd)",
                vec!["Layers (West--Roads.mxd)", "Inset (West--Roads.mxd)"]
            ),
            ("Layout (East--Parks.mxd)", vec!["Layers (East--Parks.mxd)"]),
        ]
    );
}

#[test]
fn test_reimport_carries_disambiguator_to_maps() {
    let target = ProjectTarget::Current;
    let documents = resolve_sources(
        "File",
        None,
        Some("'C:\\Maps\\West\\Roads.mxd';'C:\\Maps\\West\\Roads.mxd'"),
        "mxd",
        UnknownModePolicy::Reject,
    )
    .unwrap();

    let mut project = MemoryProject::for_target(&target, legacy_documents()).unwrap();
    let summary =
        run_conversion(&mut project, &documents, &target, &SuffixDeriver::default(), |_| {})
            .unwrap();

    assert_eq!(summary.save, SaveOutcome::SkippedCurrent);
    let second = &summary.documents[1];
    assert_eq!(second.layout.after, "Layout (West--Roads.mxd)1");
    assert_eq!(second.maps[0].after, "Layers (West--Roads.mxd)1");
}

#[test]
fn test_failed_save_still_completes() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("gone");
    fs::create_dir(&gone).unwrap();
    let target = ProjectTarget::Path(gone.join("project.json").display().to_string());

    let mut project = MemoryProject::for_target(&target, legacy_documents()).unwrap();
    fs::remove_dir(&gone).unwrap();

    let documents = resolve_sources(
        "File",
        None,
        Some("'C:\\Maps\\East\\Parks.mxd'"),
        "mxd",
        UnknownModePolicy::Reject,
    )
    .unwrap();
    let summary =
        run_conversion(&mut project, &documents, &target, &SuffixDeriver::default(), |_| {})
            .unwrap();

    assert!(matches!(summary.save, SaveOutcome::Failed(_)));
    assert_eq!(summary.documents.len(), 1);
}

#[test]
fn test_folder_batch_uses_scanned_paths() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("West");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("Roads.mxd"), b"").unwrap();
    fs::write(folder.join("notes.txt"), b"").unwrap();

    let folder_str = folder.display().to_string();
    let documents =
        resolve_sources("Folder", Some(&folder_str), None, "mxd", UnknownModePolicy::Reject)
            .unwrap();
    assert_eq!(documents.len(), 1);

    let mut project = MemoryProject::current(legacy_documents());
    let summary = run_conversion(
        &mut project,
        &documents,
        &ProjectTarget::Current,
        &SuffixDeriver::default(),
        |_| {},
    )
    .unwrap();

    assert_eq!(summary.documents[0].layout.after, "Layout (West--Roads.mxd)");
}

#[test]
fn test_unknown_document_stops_batch() {
    let documents = resolve_sources(
        "File",
        None,
        Some("'C:\\Maps\\West\\Roads.mxd';'C:\\Maps\\North\\Lakes.mxd'"),
        "mxd",
        UnknownModePolicy::Reject,
    )
    .unwrap();

    let mut project = MemoryProject::current(legacy_documents());
    let result = run_conversion(
        &mut project,
        &documents,
        &ProjectTarget::Current,
        &SuffixDeriver::default(),
        |_| {},
    );

    assert!(matches!(result, Err(GdbkitError::ImportFailed { .. })));
}

#[test]
fn test_inventory_rows_follow_geodatabase_and_item_order() {
    let gdbs = vec!["C:\\Data\\city.gdb".to_string(), "C:\\Data\\county.gdb".to_string()];
    let mut recorder = Recorder::default();

    let report = run_inventory(&host(), &gdbs, &TimestampZones::default(), &mut recorder).unwrap();

    let names: Vec<&str> = report.records.iter().map(|r| r.item_name.as_str()).collect();
    assert_eq!(names, vec!["Owners", "Elevation", "Parcels", "Hydrants", "Boundary"]);
    assert_eq!(recorder.items, names);
    assert_eq!(
        recorder.started,
        vec![("C:\\Data\\city.gdb".to_string(), 4), ("C:\\Data\\county.gdb".to_string(), 1)]
    );

    let parcels = &report.records[2];
    assert_eq!(parcels.gdb_name, "city.gdb");
    assert_eq!(parcels.full_path, "C:\\Data\\city.gdb\\Cadastre\\Parcels");
    assert_eq!(parcels.last_modified_date, "2024/03/01");
    assert_eq!(parcels.wkid, "2277");
    assert_eq!(report.records[4].gdb_name, "county.gdb");
}

#[test]
fn test_inventory_not_applicable_columns() {
    let gdbs = vec!["C:\\Data\\city.gdb".to_string()];
    let report =
        run_inventory(&host(), &gdbs, &TimestampZones::default(), &mut NoopObserver).unwrap();

    let table = &report.records[0];
    assert_eq!(table.data_type, DataType::Table);
    assert_eq!(table.last_modified_date, "2024/02/10");
    assert_eq!(table.wkid, NOT_APPLICABLE);
    assert_eq!(table.spatial_reference_name, NOT_APPLICABLE);

    let raster = &report.records[1];
    assert_eq!(raster.data_type, DataType::RasterDataset);
    assert_eq!(raster.last_modified_date, NOT_APPLICABLE);
    assert_eq!(raster.wkid, "4326");
}

#[test]
fn test_workspace_mismatch_halts_before_listing() {
    let mut host = host();
    host.redirect("C:\\Data\\county.gdb", "C:\\Data\\city.gdb");
    let gdbs = vec!["C:\\Data\\city.gdb".to_string(), "C:\\Data\\county.gdb".to_string()];
    let mut recorder = Recorder::default();

    let result = run_inventory(&host, &gdbs, &TimestampZones::default(), &mut recorder);

    assert!(matches!(result, Err(GdbkitError::WorkspaceMismatch { .. })));
    assert_eq!(recorder.started.len(), 1);
}

#[test]
fn test_describe_failure_aborts_inventory() {
    let mut broken = county_gdb();
    broken.feature_classes[0].unreadable = true;
    let mut host = host();
    host.insert("C:\\Data\\broken.gdb", broken);

    let gdbs = vec!["C:\\Data\\city.gdb".to_string(), "C:\\Data\\broken.gdb".to_string()];
    let result = run_inventory(&host, &gdbs, &TimestampZones::default(), &mut NoopObserver);

    assert!(matches!(result, Err(GdbkitError::Introspection { .. })));
}

#[test]
fn test_feature_class_without_spatial_reference_is_an_error() {
    let mut host = MemoryCatalog::new();
    host.insert(
        "/data/bare.gdb",
        GeodatabaseSnapshot {
            feature_classes: vec![
                CatalogItem::new("Points").modified("2024-01-01T00:00:00.000000")
            ],
            ..Default::default()
        },
    );

    let gdbs = vec!["/data/bare.gdb".to_string()];
    let result = run_inventory(&host, &gdbs, &TimestampZones::default(), &mut NoopObserver);

    assert!(matches!(result, Err(GdbkitError::Introspection { .. })));
}

#[test]
fn test_inventory_report_written_to_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.xlsx");
    let gdbs = vec!["C:\\Data\\city.gdb".to_string(), "C:\\Data\\county.gdb".to_string()];

    let report =
        run_inventory(&host(), &gdbs, &TimestampZones::default(), &mut NoopObserver).unwrap();
    write_report(&report, &path, &ReportLayout::default()).unwrap();

    let sheet = ReportSheet::open(&path).unwrap();
    assert_eq!(sheet.rows().len(), 6);
    assert_eq!(sheet.rows()[1][0], "Owners");
    assert_eq!(sheet.rows()[2][3], NOT_APPLICABLE);
    assert_eq!(sheet.rows()[5][2], "county.gdb");
    assert_eq!(sheet.tables()[0].range.to_string(), "A1:G6");
}
