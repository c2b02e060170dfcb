//! Multicolor and flash LED device control core.
//!
//! Two cooperating surfaces over shared device records: the color
//! scaling engine ([`MulticolorLed`]) converts one overall brightness
//! level into per-channel output levels proportional to configured
//! intensity weights, and the flash control surface ([`FlashLed`])
//! arbitrates strobe/timeout/fault access under a per-device exclusive
//! lock. Hardware access stays behind the [`FlashHardware`] port trait,
//! and the text control endpoint drives both surfaces through an
//! attribute table built once at device-registration time.

#![deny(unused_must_use)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod flash;
pub mod multicolor;
pub mod ports;

mod math;

pub use config::{ChannelConfig, FlashConfig, MulticolorConfig, RangeConfig};
pub use endpoint::{AttrTable, Attribute, flash_attrs, multicolor_attrs};
pub use error::{Error, ErrorClass, FlashFault, HwError, NUM_FLASH_FAULTS, Result};
pub use flash::{FaultSet, FlashLed};
pub use multicolor::{ChannelInfo, ColorId, MAX_CHANNELS, McSnapshot, MulticolorLed};
pub use ports::FlashHardware;
