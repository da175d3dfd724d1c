//! Integration tests for CaptureService → FsFrameStore.
//!
//! A full cycle against the mock board, persisted to a real directory, and
//! config overrides picked up from the same storage root.

use std::fs;
use std::path::PathBuf;

use crate::mock_hw::{MockBoard, RecordingSink};

use fircam::adapters::fs_store::FsFrameStore;
use fircam::app::service::{CaptureService, CycleOutcome};
use fircam::codec::thermal;
use fircam::config::{self, CONFIG_FILE_NAME, CaptureConfig};

fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fircam-it-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn cycle_leaves_exactly_two_files_on_disk() {
    let root = temp_root("cycle");
    let mut store = FsFrameStore::new(&root).unwrap();
    let mut svc = CaptureService::new(CaptureConfig::default());
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();

    let outcome = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();
    assert!(matches!(outcome, CycleOutcome::Completed(_)));

    let mut names: Vec<String> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["rgb_20240105T090307.jpg", "thermal_20240105T090307.bin"]
    );

    let bin = fs::read(root.join("thermal_20240105T090307.bin")).unwrap();
    let words = thermal::decode(&bin).unwrap();
    assert_eq!(words.len(), 64);
    assert_eq!(words[27], 3150);
    assert_eq!(words[0], 2000);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn same_second_capture_overwrites_pair() {
    let root = temp_root("overwrite");
    let mut store = FsFrameStore::new(&root).unwrap();
    let mut svc = CaptureService::new(CaptureConfig::default());
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();

    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();
    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert_eq!(fs::read_dir(&root).unwrap().count(), 2);
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn config_override_from_storage_root() {
    let root = temp_root("config");
    let store = FsFrameStore::new(&root).unwrap();
    fs::write(
        store.root().join(CONFIG_FILE_NAME),
        br#"{"settle_ms": 250, "jpeg_quality": 75}"#,
    )
    .unwrap();

    let cfg = config::load_or_default(&store.root().join(CONFIG_FILE_NAME));
    assert_eq!(cfg.settle_ms, 250);
    assert_eq!(cfg.jpeg_quality, 75);
    assert_eq!(cfg.wake_interval_ms, 10_000);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn invalid_override_falls_back_to_defaults() {
    let root = temp_root("badconfig");
    let store = FsFrameStore::new(&root).unwrap();
    fs::write(
        store.root().join(CONFIG_FILE_NAME),
        br#"{"wake_interval_ms": 0}"#,
    )
    .unwrap();

    let cfg = config::load_or_default(&store.root().join(CONFIG_FILE_NAME));
    assert_eq!(cfg, CaptureConfig::default());

    let _ = fs::remove_dir_all(&root);
}
