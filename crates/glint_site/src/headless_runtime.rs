//! Deterministic frame clock for headless runs.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical viewport width.
    pub width: f32,
    /// Logical viewport height.
    pub height: f32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!("headless viewport dimensions must be positive");
        }
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }

    /// Frames needed to cover `wait_ms`, rounding up
    pub fn wait_frames(&self, wait_ms: u64) -> u32 {
        if wait_ms == 0 {
            return 0;
        }
        let tick = self.tick_ms.max(1);
        let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
        frames.min(u32::MAX as u64) as u32
    }
}

/// Elapsed logical time across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    pub frames: u64,
    pub ms: u64,
}

impl FrameClock {
    /// Advance one frame of `ms` milliseconds, returning `dt` in seconds.
    pub fn advance(&mut self, ms: u64) -> f32 {
        self.frames = self.frames.saturating_add(1);
        self.ms = self.ms.saturating_add(ms);
        ms as f32 / 1000.0
    }
}
