//! Flash LED control surface.
//!
//! Arbitrates strobe, timeout, and fault access to a flash-capable LED.
//! All mutations serialize through a single per-device exclusive lock;
//! reads deliberately bypass it and work from atomics or a direct
//! hardware query, tolerating a momentarily stale value.
//!
//! The actual hardware effect is delegated to a [`FlashHardware`]
//! adapter; a callback failure is propagated verbatim and leaves the
//! stored state unchanged.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::config::{FlashConfig, RangeConfig};
use crate::error::{Error, FlashFault, NUM_FLASH_FAULTS, Result};
use crate::ports::FlashHardware;

// ---------------------------------------------------------------------------
// Fault decoding
// ---------------------------------------------------------------------------

/// A decoded snapshot of the hardware fault word.
///
/// Bits at or above [`NUM_FLASH_FAULTS`] are dropped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultSet(u32);

impl FaultSet {
    const MASK: u32 = (1 << NUM_FLASH_FAULTS as u32) - 1;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, fault: FlashFault) -> bool {
        self.0 & fault.mask() != 0
    }

    /// Active faults in ascending bit-position order.
    pub fn iter(self) -> impl Iterator<Item = FlashFault> {
        FlashFault::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Symbolic names of the active faults, in ascending bit-position
    /// order.
    pub fn names(self) -> heapless::Vec<&'static str, NUM_FLASH_FAULTS> {
        self.iter().map(FlashFault::name).collect()
    }
}

// ---------------------------------------------------------------------------
// FlashLed
// ---------------------------------------------------------------------------

/// A flash LED device record.
///
/// Created once at registration time and shared between entry points for
/// the device's attachment lifetime. All operations take `&self`.
pub struct FlashLed<H> {
    hw: H,
    brightness: RangeConfig,
    timeout: RangeConfig,
    /// Last hardware-synchronized flash intensity.
    brightness_val: AtomicU32,
    /// Accepted flash duration in microseconds. Stored only while
    /// `access` is held.
    timeout_val: AtomicU32,
    /// True while the flash is armed/firing. Stored only while `access`
    /// is held.
    strobe_armed: AtomicBool,
    /// The per-device exclusive lock. Guards every mutation; reads do
    /// not take it.
    access: Mutex<()>,
    /// External policy flag (maintenance mode). Checked before any
    /// mutation.
    disabled: AtomicBool,
}

impl<H: FlashHardware> FlashLed<H> {
    /// Build a device from validated creation parameters.
    pub fn new(hw: H, config: FlashConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hw,
            brightness: config.brightness,
            timeout: config.timeout,
            brightness_val: AtomicU32::new(config.brightness.min),
            timeout_val: AtomicU32::new(config.timeout.min),
            strobe_armed: AtomicBool::new(false),
            access: Mutex::new(()),
            disabled: AtomicBool::new(false),
        })
    }

    // ── Strobe ────────────────────────────────────────────────────

    /// Arm or disarm the flash strobe.
    ///
    /// Fails with [`Error::Busy`] while the device is disabled — the
    /// hardware callback is never reached in that case.
    pub fn set_strobe(&self, requested: bool) -> Result<()> {
        if self.is_disabled() {
            return Err(Error::Busy);
        }

        let _guard = self.lock();
        self.hw.set_strobe(requested)?;
        self.strobe_armed.store(requested, Ordering::Release);
        debug!(
            "flash strobe {}",
            if requested { "armed" } else { "disarmed" }
        );
        Ok(())
    }

    /// Live strobe state, re-synchronized from hardware on every call.
    /// No locking: the query is idempotent.
    pub fn strobe(&self) -> Result<bool> {
        Ok(self.hw.strobe()?)
    }

    /// Last strobe state stored by a successful [`set_strobe`].
    ///
    /// [`set_strobe`]: Self::set_strobe
    pub fn strobe_armed(&self) -> bool {
        self.strobe_armed.load(Ordering::Acquire)
    }

    // ── Timeout ───────────────────────────────────────────────────

    /// Configure the flash duration bound in microseconds.
    ///
    /// The hardware adapter validates against its `[min, max]` window
    /// and may clamp; whatever it accepted is stored. A rejection
    /// ([`Error::OutOfRange`]) is propagated, never clamped here.
    pub fn set_timeout(&self, microseconds: u32) -> Result<()> {
        if self.is_disabled() {
            return Err(Error::Busy);
        }

        let _guard = self.lock();
        let accepted = self.hw.set_timeout(microseconds)?;
        if accepted != microseconds {
            info!("flash timeout clamped: requested {microseconds} us, accepted {accepted} us");
        }
        self.timeout_val.store(accepted, Ordering::Release);
        Ok(())
    }

    /// Stored flash duration in microseconds. No locking, no hardware
    /// query.
    pub fn timeout(&self) -> u32 {
        self.timeout_val.load(Ordering::Acquire)
    }

    pub const fn max_timeout(&self) -> u32 {
        self.timeout.max
    }

    // ── Brightness ────────────────────────────────────────────────

    /// Flash intensity, refreshed from hardware immediately before being
    /// returned. No locking: the refresh is idempotent and atomic from
    /// the caller's perspective.
    pub fn brightness(&self) -> Result<u32> {
        let val = self.hw.brightness()?;
        self.brightness_val.store(val, Ordering::Release);
        Ok(val)
    }

    /// Last hardware-synchronized flash intensity, without a new query.
    pub fn cached_brightness(&self) -> u32 {
        self.brightness_val.load(Ordering::Acquire)
    }

    /// Program the flash intensity. Bounds are enforced by the hardware
    /// adapter; the accepted value is cached.
    pub fn set_brightness(&self, val: u32) -> Result<()> {
        if self.is_disabled() {
            return Err(Error::Busy);
        }

        let _guard = self.lock();
        let accepted = self.hw.set_brightness(val)?;
        self.brightness_val.store(accepted, Ordering::Release);
        Ok(())
    }

    pub const fn max_brightness(&self) -> u32 {
        self.brightness.max
    }

    // ── Faults ────────────────────────────────────────────────────

    /// Decode the momentary hardware fault word. No lock: read-only,
    /// idempotent.
    pub fn faults(&self) -> Result<FaultSet> {
        let bits = self.hw.faults()?;
        let set = FaultSet::from_bits(bits);
        if !set.is_empty() {
            warn!("flash faults active: {:?}", set.names());
        }
        Ok(set)
    }

    // ── Policy flag ───────────────────────────────────────────────

    /// Set or clear the administrative disable flag.
    pub fn set_disabled(&self, on: bool) {
        self.disabled.store(on, Ordering::Release);
        info!("flash control {}", if on { "disabled" } else { "enabled" });
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    // ── Internal ──────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, ()> {
        // Stored state is written only after the hardware call has
        // succeeded, so a panicked holder cannot leave it half-applied;
        // recover the guard instead of wedging the device.
        self.access.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
