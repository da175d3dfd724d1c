//! Visible-light camera driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps the `esp32-camera` component.  Frame buffers live in
//! PSRAM; a snapshot copies the RGB565 data out of the driver buffer and
//! holds that buffer until [`Camera::release`] hands it back.
//!
//! On host/test: renders a deterministic test pattern (colour bars with a
//! bar that moves one step per frame) at the configured resolution.

use log::{debug, info};

use crate::config::CameraSettings;
use crate::error::CameraError;
use crate::frame::VisibleFrame;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::camera;

pub struct Camera {
    settings: Option<CameraSettings>,
    frames: u32,
    released: u32,
    #[cfg(not(target_os = "espidf"))]
    extra_fb: Vec<u16>,
    #[cfg(target_os = "espidf")]
    held: Option<*mut camera::camera_fb_t>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            settings: None,
            frames: 0,
            released: 0,
            #[cfg(not(target_os = "espidf"))]
            extra_fb: Vec::new(),
            #[cfg(target_os = "espidf")]
            held: None,
        }
    }

    pub fn settings(&self) -> Option<&CameraSettings> {
        self.settings.as_ref()
    }

    /// Frames captured since boot, including warm-up frames.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Frames handed back through [`release`](Self::release).
    pub fn released(&self) -> u32 {
        self.released
    }

    /// Frames the sensor produces during `warmup_ms` at 30 FPS.
    fn warmup_frames(settings: &CameraSettings) -> u32 {
        settings.warmup_ms.div_ceil(33)
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl Camera {
    /// Reset, set format and size, skip warm-up frames, allocate the extra
    /// frame buffer.
    pub fn configure(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        let (w, h) = settings.frame_size.dimensions();

        self.settings = None;
        self.frames = 0;
        self.released = 0;
        self.extra_fb = Vec::new();

        if settings.warmup_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(settings.warmup_ms)));
        }
        self.frames += Self::warmup_frames(settings);

        if settings.extra_framebuffer {
            let len = w as usize * h as usize;
            self.extra_fb
                .try_reserve_exact(len)
                .map_err(|_| CameraError::BufferAllocFailed)?;
            self.extra_fb.resize(len, 0);
        }

        self.settings = Some(*settings);
        info!(
            "camera(sim): {:?} {}x{}, warm-up {} frames, extra fb={}",
            settings.pixel_format,
            w,
            h,
            self.frames,
            settings.extra_framebuffer
        );
        Ok(())
    }

    pub fn snapshot(&mut self) -> Result<VisibleFrame, CameraError> {
        let settings = self.settings.ok_or(CameraError::NotConfigured)?;
        let (w, h) = settings.frame_size.dimensions();
        self.frames = self.frames.wrapping_add(1);
        let frame = VisibleFrame::from_fn(w, h, test_pattern(w, self.frames));
        debug!("camera(sim): frame {} {}x{}", self.frames, w, h);
        Ok(frame)
    }

    pub fn release(&mut self, frame: VisibleFrame) {
        drop(frame);
        self.released = self.released.wrapping_add(1);
    }

    /// Size of the extra frame buffer in pixels (0 when not allocated).
    pub fn extra_framebuffer_len(&self) -> usize {
        self.extra_fb.len()
    }
}

/// Eight vertical colour bars with an inverted bar sweeping left to right.
#[cfg(not(target_os = "espidf"))]
fn test_pattern(w: u32, frame: u32) -> impl FnMut(u32, u32) -> u16 {
    const BARS: [u16; 8] = [
        0xFFFF, 0xFFE0, 0x07FF, 0x07E0, 0xF81F, 0xF800, 0x001F, 0x0000,
    ];
    let bar_w = (w / 8).max(1);
    let sweep_x = (frame.wrapping_mul(bar_w / 4 + 1)) % w.max(1);
    move |x, _y| {
        let bar = BARS[((x / bar_w) as usize).min(7)];
        if x.abs_diff(sweep_x) < 2 { !bar } else { bar }
    }
}

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl Camera {
    pub fn configure(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        use crate::pins;
        use esp_idf_svc::sys::{
            ESP_OK, MALLOC_CAP_SPIRAM, heap_caps_get_free_size, ledc_channel_t_LEDC_CHANNEL_0,
            ledc_timer_t_LEDC_TIMER_0,
        };

        use crate::config::PixelFormat;

        let (w, h) = settings.frame_size.dimensions();
        let fb_count: usize = if settings.extra_framebuffer { 2 } else { 1 };

        // Driver buffers plus the owned copy made by `snapshot`.
        let needed = w as usize * h as usize * 2 * (fb_count + 1);
        // SAFETY: read-only heap statistics query.
        let free = unsafe { heap_caps_get_free_size(MALLOC_CAP_SPIRAM) };
        if needed > free {
            log::error!(
                "camera: {}x{} needs {} B of PSRAM, {} B free",
                w,
                h,
                needed,
                free
            );
            return Err(CameraError::UnsupportedSetting);
        }

        let config = camera::camera_config_t {
            pin_pwdn: pins::CAM_PWDN_GPIO,
            pin_reset: pins::CAM_RESET_GPIO,
            pin_xclk: pins::CAM_XCLK_GPIO,
            __bindgen_anon_1: camera::camera_config_t__bindgen_ty_1 {
                pin_sccb_sda: pins::CAM_SIOD_GPIO,
            },
            __bindgen_anon_2: camera::camera_config_t__bindgen_ty_2 {
                pin_sccb_scl: pins::CAM_SIOC_GPIO,
            },
            pin_d0: pins::CAM_DATA_GPIO[0],
            pin_d1: pins::CAM_DATA_GPIO[1],
            pin_d2: pins::CAM_DATA_GPIO[2],
            pin_d3: pins::CAM_DATA_GPIO[3],
            pin_d4: pins::CAM_DATA_GPIO[4],
            pin_d5: pins::CAM_DATA_GPIO[5],
            pin_d6: pins::CAM_DATA_GPIO[6],
            pin_d7: pins::CAM_DATA_GPIO[7],
            pin_vsync: pins::CAM_VSYNC_GPIO,
            pin_href: pins::CAM_HREF_GPIO,
            pin_pclk: pins::CAM_PCLK_GPIO,
            xclk_freq_hz: pins::CAM_XCLK_FREQ_HZ,
            ledc_timer: ledc_timer_t_LEDC_TIMER_0,
            ledc_channel: ledc_channel_t_LEDC_CHANNEL_0,
            pixel_format: match settings.pixel_format {
                PixelFormat::Rgb565 => camera::pixformat_t_PIXFORMAT_RGB565,
            },
            frame_size: framesize(settings.frame_size),
            jpeg_quality: 12,
            fb_count,
            fb_location: camera::camera_fb_location_t_CAMERA_FB_IN_PSRAM,
            grab_mode: camera::camera_grab_mode_t_CAMERA_GRAB_LATEST,
            ..Default::default()
        };

        // SAFETY: single call from the boot path; the config outlives the call.
        let rc = unsafe { camera::esp_camera_init(&config) };
        if rc != ESP_OK as i32 {
            return Err(CameraError::InitFailed(rc));
        }

        self.frames = 0;
        self.released = 0;
        let start = uptime_ms();
        let mut skipped = 0u32;
        while uptime_ms().saturating_sub(start) < u64::from(settings.warmup_ms) {
            // SAFETY: driver initialised above; each buffer is returned at once.
            unsafe {
                let fb = camera::esp_camera_fb_get();
                if !fb.is_null() {
                    camera::esp_camera_fb_return(fb);
                    skipped += 1;
                }
            }
        }
        self.frames = skipped;

        self.settings = Some(*settings);
        info!(
            "camera: RGB565 {}x{}, {} frame buffers, skipped {} (expected ~{})",
            w,
            h,
            fb_count,
            skipped,
            Self::warmup_frames(settings)
        );
        Ok(())
    }

    pub fn snapshot(&mut self) -> Result<VisibleFrame, CameraError> {
        if self.settings.is_none() {
            return Err(CameraError::NotConfigured);
        }
        if let Some(prev) = self.held.take() {
            // SAFETY: `prev` came from esp_camera_fb_get and was not returned.
            unsafe { camera::esp_camera_fb_return(prev) };
        }

        // SAFETY: driver initialised in `configure`.
        let fb = unsafe { camera::esp_camera_fb_get() };
        if fb.is_null() {
            return Err(CameraError::CaptureFailed);
        }
        // SAFETY: non-null buffer owned by us until esp_camera_fb_return.
        let (w, h, data) = unsafe {
            let fb_ref = &*fb;
            (
                fb_ref.width as u32,
                fb_ref.height as u32,
                core::slice::from_raw_parts(fb_ref.buf, fb_ref.len),
            )
        };

        let mut pixels = Vec::new();
        if pixels.try_reserve_exact(data.len() / 2).is_err() {
            // SAFETY: as above.
            unsafe { camera::esp_camera_fb_return(fb) };
            return Err(CameraError::BufferAllocFailed);
        }
        pixels.extend(
            data.chunks_exact(2)
                .map(|b| u16::from_be_bytes([b[0], b[1]])),
        );

        self.held = Some(fb);
        self.frames = self.frames.wrapping_add(1);
        VisibleFrame::new(w, h, pixels)
    }

    pub fn release(&mut self, frame: VisibleFrame) {
        drop(frame);
        if let Some(fb) = self.held.take() {
            // SAFETY: `fb` came from esp_camera_fb_get and was not returned.
            unsafe { camera::esp_camera_fb_return(fb) };
        }
        self.released = self.released.wrapping_add(1);
    }
}

#[cfg(target_os = "espidf")]
fn framesize(size: crate::config::FrameSize) -> camera::framesize_t {
    use crate::config::FrameSize;
    match size {
        FrameSize::Qqvga => camera::framesize_t_FRAMESIZE_QQVGA,
        FrameSize::Qvga => camera::framesize_t_FRAMESIZE_QVGA,
        FrameSize::Vga => camera::framesize_t_FRAMESIZE_VGA,
        FrameSize::Uxga => camera::framesize_t_FRAMESIZE_UXGA,
        FrameSize::Wqxga2 => camera::framesize_t_FRAMESIZE_QSXGA,
    }
}

#[cfg(target_os = "espidf")]
fn uptime_ms() -> u64 {
    // SAFETY: monotonic timer read, no preconditions.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1000
}
