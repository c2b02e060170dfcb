//! Multicolor LED device: the color scaling engine.
//!
//! A multicolor device carries one intensity weight per physical color
//! channel. Whenever the overall brightness changes, every channel's
//! output level is recomputed as
//! `round(overall * intensity / max_brightness)` — recomputed in full,
//! never incrementally updated, so the per-channel levels always agree
//! with the current weights.
//!
//! Intensity writes serialize through the device access lock together
//! with brightness updates; reads return copied snapshots.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::MulticolorConfig;
use crate::error::{Error, Result};
use crate::math::div_round_closest;

/// Upper bound on the number of channels a single device may carry.
pub const MAX_CHANNELS: usize = 8;

/// Physical LED color tag. Not guaranteed unique within a device — a
/// fixture may carry two white emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorId {
    White,
    Red,
    Green,
    Blue,
    Amber,
    Violet,
    Yellow,
    Ir,
}

impl ColorId {
    /// Name as exposed on the control endpoint's `multi_index` read.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Amber => "amber",
            Self::Violet => "violet",
            Self::Yellow => "yellow",
            Self::Ir => "ir",
        }
    }
}

impl core::fmt::Display for ColorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One channel of a multicolor device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub color: ColorId,
    /// User-configurable weight, `0..=max_brightness`.
    pub intensity: u32,
    /// Derived output level; read-only outside the engine.
    pub brightness: u32,
}

/// Channel state guarded by the device access lock.
#[derive(Debug)]
struct McState {
    overall: u32,
    channels: heapless::Vec<ChannelInfo, MAX_CHANNELS>,
}

/// Copied point-in-time view of a device's channel state.
#[derive(Debug, Clone)]
pub struct McSnapshot {
    pub overall: u32,
    pub channels: heapless::Vec<ChannelInfo, MAX_CHANNELS>,
}

/// A multicolor LED device record.
///
/// Created once at registration time and shared between entry points for
/// the device's attachment lifetime.
pub struct MulticolorLed {
    max_brightness: u32,
    num_channels: usize,
    state: Mutex<McState>,
}

impl MulticolorLed {
    /// Build a device from validated creation parameters.
    ///
    /// Rejecting `max_brightness == 0` here is what makes the scaling
    /// divisions below infallible.
    pub fn new(config: MulticolorConfig) -> Result<Self> {
        config.validate()?;

        let mut channels = heapless::Vec::new();
        for ch in &config.channels {
            let _ = channels.push(ChannelInfo {
                color: ch.color,
                intensity: ch.intensity,
                brightness: 0,
            });
        }

        Ok(Self {
            max_brightness: config.max_brightness,
            num_channels: channels.len(),
            state: Mutex::new(McState {
                overall: 0,
                channels,
            }),
        })
    }

    /// Apply a new overall brightness and rescale every channel.
    ///
    /// `overall` is expected in `0..=max_brightness`; out-of-range values
    /// are the caller's responsibility to clamp (the control endpoint
    /// does this before calling in).
    pub fn set_brightness(&self, overall: u32) {
        let mut state = self.lock();
        state.overall = overall;
        Self::rescale(&mut state, self.max_brightness);
    }

    /// Replace every channel's intensity weight and rescale with the
    /// stored overall brightness.
    ///
    /// `values.len()` must equal the channel count, and each weight must
    /// fit `0..=max_brightness`.
    pub fn set_intensities(&self, values: &[u32]) -> Result<()> {
        if values.len() != self.num_channels {
            return Err(Error::InvalidArgument("intensity count mismatch"));
        }
        if values.iter().any(|&v| v > self.max_brightness) {
            return Err(Error::InvalidArgument("intensity exceeds max_brightness"));
        }

        let mut state = self.lock();
        for (ch, &value) in state.channels.iter_mut().zip(values) {
            ch.intensity = value;
        }
        Self::rescale(&mut state, self.max_brightness);
        debug!("multicolor intensities updated: {values:?}");
        Ok(())
    }

    /// Current overall brightness.
    pub fn brightness(&self) -> u32 {
        self.lock().overall
    }

    pub const fn max_brightness(&self) -> u32 {
        self.max_brightness
    }

    pub const fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Channel color tags in output order.
    pub fn colors(&self) -> heapless::Vec<ColorId, MAX_CHANNELS> {
        self.lock().channels.iter().map(|ch| ch.color).collect()
    }

    /// Copied view of the full channel state.
    pub fn snapshot(&self) -> McSnapshot {
        let state = self.lock();
        McSnapshot {
            overall: state.overall,
            channels: state.channels.clone(),
        }
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Recompute every channel's output level, in index order. All
    /// channels are updated in one pass under the lock; there is no
    /// partial application.
    fn rescale(state: &mut McState, max_brightness: u32) {
        let overall = u64::from(state.overall);
        for ch in state.channels.iter_mut() {
            ch.brightness = div_round_closest(
                overall * u64::from(ch.intensity),
                u64::from(max_brightness),
            ) as u32;
        }
    }

    fn lock(&self) -> MutexGuard<'_, McState> {
        // A panicked holder cannot leave a half-applied rescale visible:
        // every store happens in one pass, so recover the guard.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
