//! Headless runtime primitives for deterministic page runs.

use anyhow::{bail, Result};
use drift_core::Size;
use drift_platform::HeadlessHost;

use crate::app::DriftApp;

/// Configuration for a fixed-budget headless frame loop.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Viewport width in CSS pixels.
    pub width: u32,
    /// Viewport height in CSS pixels.
    pub height: u32,
    /// Frames to deliver before returning.
    pub max_frames: u32,
}

impl HeadlessRunConfig {
    pub fn viewport(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            max_frames: 1,
        }
    }
}

/// Per-frame snapshot handed to the run callback.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    pub width: u32,
    pub height: u32,
    pub elapsed_ms: f64,
    /// Whether the host had a frame pending for this tick
    pub delivered: bool,
}

/// Fixed-step frame loop over a [`HeadlessHost`].
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget against a headless page.
    ///
    /// Every tick advances the host clock, delivers the pending frame (if the
    /// app requested one), drains all resulting events into the app and then
    /// hands the context to `on_frame`.
    pub fn run<F>(
        cfg: HeadlessRunConfig,
        app: &mut DriftApp,
        host: &mut HeadlessHost,
        mut on_frame: F,
    ) -> Result<()>
    where
        F: FnMut(&HeadlessContext, &DriftApp, &HeadlessHost),
    {
        if cfg.width == 0 || cfg.height == 0 {
            bail!("headless dimensions must be non-zero");
        }
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }

        for frame in 0..cfg.max_frames {
            let delivered = host.advance_frame();
            app.pump(host);
            on_frame(
                &HeadlessContext {
                    frame_index: frame,
                    width: cfg.width,
                    height: cfg.height,
                    elapsed_ms: host.elapsed_ms(),
                    delivered,
                },
                app,
                host,
            );
        }

        Ok(())
    }
}
