//! Integration tests for the CaptureService → ports pipeline.
//!
//! These run on the host (x86_64) against [`MockBoard`] and verify the
//! order of peripheral calls, the files written per cycle, and the
//! skip-on-thermal-error behaviour.

use crate::mock_hw::{HwCall, MockBoard, MemStore, RecordingSink};

use fircam::app::events::CaptureEvent;
use fircam::app::ports::{FrameStore, WakeReason};
use fircam::app::service::{CaptureService, CycleOutcome};
use fircam::codec::thermal;
use fircam::config::CaptureConfig;
use fircam::error::{CameraError, Error, StorageError, ThermalError};
use fircam::frame::ThermalFrame;
use fircam::timestamp::{RtcDateTime, stamp_of};

fn booted() -> (CaptureService, MockBoard, MemStore, RecordingSink) {
    let mut svc = CaptureService::new(CaptureConfig::default());
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    svc.boot(&mut hw, &mut sink).unwrap();
    hw.calls.clear();
    (svc, hw, MemStore::new(), sink)
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_configures_camera_and_reports_wake_reason() {
    let config = CaptureConfig::default();
    let mut svc = CaptureService::new(config.clone());
    let mut hw = MockBoard::new();
    hw.wake_reason = WakeReason::Timer;
    let mut sink = RecordingSink::new();

    svc.boot(&mut hw, &mut sink).unwrap();

    assert_eq!(hw.calls, vec![HwCall::Configure(config.camera)]);
    assert_eq!(sink.events, vec![CaptureEvent::Booted(WakeReason::Timer)]);
}

#[test]
fn boot_rejects_invalid_config_before_touching_hardware() {
    let config = CaptureConfig {
        jpeg_quality: 0,
        ..CaptureConfig::default()
    };
    let mut svc = CaptureService::new(config);
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();

    let err = svc.boot(&mut hw, &mut sink).unwrap_err();

    assert_eq!(err, Error::Config("jpeg_quality must be 1-100"));
    assert!(hw.calls.is_empty());
    assert!(sink.events.is_empty());
}

// ── Successful cycle ──────────────────────────────────────────

#[test]
fn cycle_calls_peripherals_in_order() {
    let (mut svc, mut hw, mut store, mut sink) = booted();

    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert_eq!(
        hw.calls,
        vec![
            HwCall::ThermalInit,
            HwCall::DelayMs(3000),
            HwCall::Snapshot,
            HwCall::ReadThermal,
            HwCall::ThermalDeinit,
            HwCall::Release {
                width: 32,
                height: 24
            },
            HwCall::ArmWakeup(10_000),
            HwCall::DeepSleep,
        ]
    );
}

#[test]
fn cycle_writes_rgb_then_thermal_with_shared_stamp() {
    let (mut svc, mut hw, mut store, mut sink) = booted();

    let outcome = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert_eq!(
        store.writes,
        vec![
            "rgb_20240105T090307.jpg".to_string(),
            "thermal_20240105T090307.bin".to_string()
        ]
    );
    assert_eq!(stamp_of(&store.writes[0]), stamp_of(&store.writes[1]));

    let CycleOutcome::Completed(saved) = outcome else {
        panic!("expected a completed cycle");
    };
    assert_eq!(saved.timestamp.as_str(), "20240105T090307");
    assert_eq!(saved.thermal_samples, 64);
    assert_eq!(saved.max_c, 31.5);
    assert_eq!(saved.min_c, 20.0);
}

#[test]
fn rgb_file_is_a_jpeg() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    let jpeg = store.get("rgb_20240105T090307.jpg").unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
}

#[test]
fn thermal_file_holds_hundredths_little_endian() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    let mut pixels = vec![0.0; 64];
    pixels[0] = 21.5;
    pixels[1] = -3.25;
    pixels[2] = 36.789;
    hw.thermal
        .push_back(Ok(ThermalFrame::from_pixels(22.0, pixels.clone())));

    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    let bin = store.get("thermal_20240105T090307.bin").unwrap();
    assert_eq!(bin.len(), 64 * 2);
    // 2150 = 0x0866, -325 = 0xFEBB, 3678 = 0x0E5E
    assert_eq!(&bin[..6], &[0x66, 0x08, 0xBB, 0xFE, 0x5E, 0x0E]);
    assert!(bin[6..].iter().all(|&b| b == 0));

    let words = thermal::decode(bin).unwrap();
    for (w, c) in words.iter().zip(&pixels) {
        assert_eq!(*w, (c * 100.0).trunc() as i16);
    }
}

#[test]
fn stamp_follows_the_rtc() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    hw.now = RtcDateTime::new(1999, 12, 31, 23, 59, 58);

    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert!(store.exists("rgb_19991231T235958.jpg"));
    assert!(store.exists("thermal_19991231T235958.bin"));
}

#[test]
fn cycle_events_are_started_saved_sleeping() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    sink.events.clear();

    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert_eq!(sink.events.len(), 3);
    assert_eq!(
        sink.events[0],
        CaptureEvent::CycleStarted {
            cycle: 1,
            fps: None
        }
    );
    assert!(matches!(sink.events[1], CaptureEvent::Saved(_)));
    assert_eq!(sink.events[2], CaptureEvent::Sleeping { wake_ms: 10_000 });
}

#[test]
fn second_cycle_reports_rate() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();
    sink.events.clear();
    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    // 3 s settle + 10 s sleep between cycle starts.
    let CaptureEvent::CycleStarted { cycle, fps: Some(fps) } = sink.events[0] else {
        panic!("expected a rate on the second cycle");
    };
    assert_eq!(cycle, 2);
    assert!((fps - 1.0 / 13.0).abs() < 1e-4);
    assert_eq!(svc.cycles(), 2);
}

#[test]
fn configured_timings_are_used() {
    let config = CaptureConfig {
        settle_ms: 500,
        wake_interval_ms: 60_000,
        ..CaptureConfig::default()
    };
    let mut svc = CaptureService::new(config);
    let mut hw = MockBoard::new();
    let mut store = MemStore::new();
    let mut sink = RecordingSink::new();

    svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert_eq!(hw.count(&HwCall::DelayMs(500)), 1);
    assert_eq!(hw.count(&HwCall::ArmWakeup(60_000)), 1);
}

// ── Skip path ─────────────────────────────────────────────────

#[test]
fn thermal_io_error_skips_rest_of_cycle() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    sink.events.clear();
    hw.thermal.push_back(Err(ThermalError::Io));

    let outcome = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert_eq!(outcome, CycleOutcome::Skipped);
    assert_eq!(
        hw.calls,
        vec![
            HwCall::ThermalInit,
            HwCall::DelayMs(3000),
            HwCall::Snapshot,
            HwCall::ReadThermal,
        ]
    );
    assert!(store.files.is_empty());
    assert_eq!(hw.released(), 0);
    assert!(!hw.slept());
    assert_eq!(sink.events[1], CaptureEvent::ThermalReadFailed { cycle: 1 });
    assert_eq!(svc.skipped(), 1);
}

#[test]
fn loop_continues_after_skip() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    hw.thermal.push_back(Err(ThermalError::Io));
    hw.thermal.push_back(Err(ThermalError::Io));

    assert_eq!(
        svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap(),
        CycleOutcome::Skipped
    );
    assert_eq!(
        svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap(),
        CycleOutcome::Skipped
    );
    let third = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap();

    assert!(matches!(third, CycleOutcome::Completed(_)));
    assert_eq!(store.files.len(), 2);
    // Re-initialised every cycle without an intervening deinit.
    assert_eq!(hw.count(&HwCall::ThermalInit), 3);
    assert_eq!(hw.count(&HwCall::ThermalDeinit), 1);
    assert_eq!(hw.count(&HwCall::DeepSleep), 1);
    assert_eq!((svc.cycles(), svc.skipped()), (3, 2));
}

// ── Fatal errors ──────────────────────────────────────────────

#[test]
fn thermal_misuse_is_fatal() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    hw.thermal.push_back(Err(ThermalError::NotInitialised));

    let err = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap_err();

    assert_eq!(err, Error::Thermal(ThermalError::NotInitialised));
    assert!(store.files.is_empty());
    assert!(!hw.slept());
}

#[test]
fn storage_failure_is_fatal() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    store.fail_with = Some(StorageError::Full);

    let err = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap_err();

    assert_eq!(err, Error::Storage(StorageError::Full));
    assert_eq!(hw.count(&HwCall::ThermalDeinit), 0);
    assert!(!hw.slept());
}

#[test]
fn snapshot_failure_is_fatal() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    hw.snapshot_error = Some(CameraError::CaptureFailed);

    let err = svc.run_cycle(&mut hw, &mut store, &mut sink).unwrap_err();

    assert_eq!(err, Error::Camera(CameraError::CaptureFailed));
    assert_eq!(hw.count(&HwCall::ReadThermal), 0);
}

#[test]
fn run_returns_first_fatal_error() {
    let (mut svc, mut hw, mut store, mut sink) = booted();
    hw.thermal.push_back(Err(ThermalError::Io));
    hw.thermal.push_back(Ok(MockBoard::default_thermal()));
    hw.thermal.push_back(Err(ThermalError::NotInitialised));

    let err = svc.run(&mut hw, &mut store, &mut sink).unwrap_err();

    assert_eq!(err, Error::Thermal(ThermalError::NotInitialised));
    assert_eq!((svc.cycles(), svc.skipped()), (3, 1));
    assert_eq!(store.files.len(), 2);
}
