//! Unified error types for the LED control core.
//!
//! Follows embedded best practice: a single `Error` enum that every
//! surface can convert into, keeping the control-endpoint error handling
//! uniform. All variants are `Copy` so they can be cheaply passed back
//! through the attribute layer without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed or unparseable input, or a count mismatch against the
    /// device's channel layout. The `&'static str` names what was wrong.
    InvalidArgument(&'static str),
    /// The device is administratively disabled (maintenance mode).
    Busy,
    /// A value was rejected by hardware-side bounds.
    OutOfRange,
    /// An underlying hardware callback failed.
    Hardware(HwError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Busy => write!(f, "device busy"),
            Self::OutOfRange => write!(f, "value out of range"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
        }
    }
}

impl Error {
    /// Coarse classification for CLI / API wrapper layers.
    ///
    /// Exact numeric codes are transport-specific; wrappers map these
    /// three classes onto whatever their transport defines.
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::InvalidArgument(_) | Self::OutOfRange => ErrorClass::InvalidArgument,
            Self::Busy => ErrorClass::Busy,
            Self::Hardware(_) => ErrorClass::Io,
        }
    }
}

/// Error class exposed to transport wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    InvalidArgument,
    Busy,
    Io,
}

// ---------------------------------------------------------------------------
// Hardware callback errors
// ---------------------------------------------------------------------------

/// Failure reported by a [`FlashHardware`](crate::ports::FlashHardware)
/// callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwError {
    /// Register bus access failed.
    Bus,
    /// The underlying driver does not implement this operation.
    Unsupported,
    /// The requested value lies outside the hardware's accepted range.
    OutOfRange,
}

impl fmt::Display for HwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus access failed"),
            Self::Unsupported => write!(f, "operation not supported"),
            Self::OutOfRange => write!(f, "rejected by hardware bounds"),
        }
    }
}

impl From<HwError> for Error {
    fn from(e: HwError) -> Self {
        match e {
            HwError::OutOfRange => Self::OutOfRange,
            other => Self::Hardware(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Flash faults
// ---------------------------------------------------------------------------

/// Number of defined flash fault kinds. Bits at or above this position in
/// a hardware fault word are ignored by the decoder.
pub const NUM_FLASH_FAULTS: usize = 9;

/// Abnormal flash-LED conditions reported by hardware as a bitmask.
///
/// Faults are sticky-until-read on the hardware side; this core only
/// decodes a momentary snapshot, it never latches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum FlashFault {
    LedOverVoltage = 1 << 0,
    TimeoutExceeded = 1 << 1,
    ControllerOverTemperature = 1 << 2,
    ControllerShortCircuit = 1 << 3,
    PowerSupplyOverCurrent = 1 << 4,
    IndicatorLedFault = 1 << 5,
    LedUnderVoltage = 1 << 6,
    ControllerUnderVoltage = 1 << 7,
    LedOverTemperature = 1 << 8,
}

impl FlashFault {
    /// All fault kinds in ascending bit-position order.
    pub const ALL: [Self; NUM_FLASH_FAULTS] = [
        Self::LedOverVoltage,
        Self::TimeoutExceeded,
        Self::ControllerOverTemperature,
        Self::ControllerShortCircuit,
        Self::PowerSupplyOverCurrent,
        Self::IndicatorLedFault,
        Self::LedUnderVoltage,
        Self::ControllerUnderVoltage,
        Self::LedOverTemperature,
    ];

    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u32 {
        self as u32
    }

    /// Symbolic name as exposed on the control endpoint.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LedOverVoltage => "led-over-voltage",
            Self::TimeoutExceeded => "flash-timeout-exceeded",
            Self::ControllerOverTemperature => "controller-over-temperature",
            Self::ControllerShortCircuit => "controller-short-circuit",
            Self::PowerSupplyOverCurrent => "led-power-supply-over-current",
            Self::IndicatorLedFault => "indicator-led-fault",
            Self::LedUnderVoltage => "led-under-voltage",
            Self::ControllerUnderVoltage => "controller-under-voltage",
            Self::LedOverTemperature => "led-over-temperature",
        }
    }
}

impl fmt::Display for FlashFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
