//! Device creation parameters.
//!
//! The external registrar builds these (from device tree, firmware
//! tables, or a provisioning channel), and the core validates them once
//! at construction. Invalid ranges are rejected, never silently clamped.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::multicolor::{ColorId, MAX_CHANNELS};

/// One channel of a multicolor LED: physical color plus its initial
/// intensity weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub color: ColorId,
    /// Initial intensity weight, `0..=max_brightness`.
    pub intensity: u32,
}

/// Creation parameters for a multicolor LED device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MulticolorConfig {
    /// Upper bound for the overall brightness level. Must be non-zero:
    /// it is the divisor of every per-channel scaling computation.
    pub max_brightness: u32,
    /// Channel layout, in output order. `1..=MAX_CHANNELS` entries.
    pub channels: heapless::Vec<ChannelConfig, MAX_CHANNELS>,
}

impl Default for MulticolorConfig {
    fn default() -> Self {
        let mut channels = heapless::Vec::new();
        for color in [ColorId::Red, ColorId::Green, ColorId::Blue] {
            let _ = channels.push(ChannelConfig {
                color,
                intensity: 255,
            });
        }
        Self {
            max_brightness: 255,
            channels,
        }
    }
}

impl MulticolorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_brightness == 0 {
            return Err(Error::InvalidArgument("max_brightness must be non-zero"));
        }
        if self.channels.is_empty() {
            return Err(Error::InvalidArgument("device needs at least one channel"));
        }
        if self
            .channels
            .iter()
            .any(|ch| ch.intensity > self.max_brightness)
        {
            return Err(Error::InvalidArgument("intensity exceeds max_brightness"));
        }
        Ok(())
    }
}

/// Inclusive value range for a flash setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeConfig {
    pub min: u32,
    pub max: u32,
}

/// Creation parameters for a flash LED device.
///
/// Both ranges are fixed for the device's attachment lifetime; the
/// hardware driver enforces them on every write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlashConfig {
    /// Flash intensity range.
    pub brightness: RangeConfig,
    /// Flash duration range in microseconds.
    pub timeout: RangeConfig,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            brightness: RangeConfig {
                min: 15_625,
                max: 500_000,
            },
            timeout: RangeConfig {
                min: 1_000,
                max: 820_000,
            },
        }
    }
}

impl FlashConfig {
    pub fn validate(&self) -> Result<()> {
        if self.brightness.max == 0 {
            return Err(Error::InvalidArgument("flash brightness max must be non-zero"));
        }
        if self.brightness.min > self.brightness.max {
            return Err(Error::InvalidArgument("flash brightness range inverted"));
        }
        if self.timeout.min > self.timeout.max {
            return Err(Error::InvalidArgument("flash timeout range inverted"));
        }
        Ok(())
    }
}
