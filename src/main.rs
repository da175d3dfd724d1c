//! fircam firmware: main entry point
//!
//! Hexagonal architecture with one capture per wake and deep sleep in
//! between.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter              FsFrameStore     LogEventSink    │
//! │  (Camera+Thermal+Clock+Power) (FrameStore)     (EventSink)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            CaptureService (pure sequencing)            │    │
//! │  │  settle · snapshot · FIR read · JPEG · raw · sleep     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On the host the same binary runs against the simulated camera and
//! FIR bus, writing into `./captures` (or the directory given as the
//! first argument).
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use fircam::adapters::fs_store::FsFrameStore;
use fircam::adapters::hardware::HardwareAdapter;
use fircam::adapters::log_sink::LogEventSink;
use fircam::adapters::power::PowerAdapter;
use fircam::adapters::time::RtcClock;
use fircam::app::service::CaptureService;
use fircam::config::{self, CONFIG_FILE_NAME};
use fircam::drivers::camera::Camera;
use fircam::error::Error;
use fircam::sensors::amg8833::{Amg8833, DEFAULT_ADDRESS};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Runtime bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("fircam v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Storage + config ───────────────────────────────────
    let mut store = open_store()?;
    let config = config::load_or_default(&store.root().join(CONFIG_FILE_NAME));

    // ── 3. Hardware ───────────────────────────────────────────
    let mut hw = build_board()?;
    let mut log_sink = LogEventSink::new();

    // ── 4. Capture loop (returns only on a fatal error) ───────
    let mut service = CaptureService::new(config);
    service.boot(&mut hw, &mut log_sink)?;
    if let Err(e) = service.run(&mut hw, &mut store, &mut log_sink) {
        log::error!(
            "capture loop stopped after {} cycles ({} skipped): {}",
            service.cycles(),
            service.skipped(),
            e
        );
        return Err(e.into());
    }
    Ok(())
}

// ── ESP-IDF wiring ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn open_store() -> Result<FsFrameStore> {
    fircam::adapters::fs_store::mount_flash(c"/data", c"storage").map_err(Error::from)?;
    Ok(FsFrameStore::new("/data").map_err(Error::from)?)
}

#[cfg(target_os = "espidf")]
fn build_board() -> Result<
    HardwareAdapter<esp_idf_hal::i2c::I2cDriver<'static>, esp_idf_hal::delay::FreeRtos>,
> {
    use esp_idf_hal::gpio::AnyIOPin;
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::Hertz;
    use fircam::pins;

    let peripherals = Peripherals::take()?;
    // SAFETY: the FIR bus pins are used by nothing else.
    let (sda, scl) = unsafe {
        (
            AnyIOPin::new(pins::FIR_I2C_SDA_GPIO),
            AnyIOPin::new(pins::FIR_I2C_SCL_GPIO),
        )
    };
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::FIR_I2C_FREQ_HZ));
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config)?;

    Ok(HardwareAdapter::new(
        Camera::new(),
        Amg8833::new(i2c, DEFAULT_ADDRESS),
        RtcClock::new(),
        PowerAdapter::new(),
        esp_idf_hal::delay::FreeRtos,
    ))
}

// ── Host simulation wiring ────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
fn open_store() -> Result<FsFrameStore> {
    let root = std::env::args().nth(1).unwrap_or_else(|| "captures".to_string());
    Ok(FsFrameStore::new(root).map_err(Error::from)?)
}

#[cfg(not(target_os = "espidf"))]
fn build_board() -> Result<
    HardwareAdapter<fircam::sensors::sim_bus::SimAmg8833Bus, fircam::adapters::delay::StdDelay>,
> {
    info!("host build: simulated camera and FIR sensor");
    Ok(HardwareAdapter::new(
        Camera::new(),
        Amg8833::new(fircam::sensors::sim_bus::SimAmg8833Bus::new(), DEFAULT_ADDRESS),
        RtcClock::new(),
        PowerAdapter::new(),
        fircam::adapters::delay::StdDelay,
    ))
}
