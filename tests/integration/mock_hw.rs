//! Mock flash hardware adapter for integration tests.
//!
//! Records every mutating callback so tests can assert on the full
//! command history without touching real registers. Thread-safe: the
//! flash device is shared between entry points, so the mock is too.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use multiled::{FlashHardware, HwError};

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    SetStrobe(bool),
    SetBrightness(u32),
    SetTimeout(u32),
}

// ── MockFlashHw ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockState {
    calls: Mutex<Vec<HwCall>>,
    strobe: AtomicBool,
    brightness: AtomicU32,
    faults: AtomicU32,
    fail_all: AtomicBool,
    reject_out_of_range: AtomicBool,
}

/// The driver-side timeout window the mock enforces. Matches the
/// default `FlashConfig` bounds.
pub const TIMEOUT_MIN_US: u32 = 1_000;
pub const TIMEOUT_MAX_US: u32 = 820_000;

#[derive(Clone, Default)]
pub struct MockFlashHw(Arc<MockState>);

#[allow(dead_code)]
impl MockFlashHw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HwCall> {
        self.0.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<HwCall> {
        self.0.calls.lock().unwrap().last().copied()
    }

    pub fn call_count(&self) -> usize {
        self.0.calls.lock().unwrap().len()
    }

    /// Flip the hardware-side strobe state behind the core's back, as
    /// a self-clearing strobe would at end of flash.
    pub fn force_strobe(&self, on: bool) {
        self.0.strobe.store(on, Ordering::SeqCst);
    }

    pub fn set_hw_brightness(&self, val: u32) {
        self.0.brightness.store(val, Ordering::SeqCst);
    }

    pub fn set_faults(&self, bits: u32) {
        self.0.faults.store(bits, Ordering::SeqCst);
    }

    /// Make every subsequent callback fail with a bus error.
    pub fn fail_all(&self, on: bool) {
        self.0.fail_all.store(on, Ordering::SeqCst);
    }

    /// Reject out-of-window timeouts instead of clamping them.
    pub fn reject_out_of_range(&self, on: bool) {
        self.0.reject_out_of_range.store(on, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), HwError> {
        if self.0.fail_all.load(Ordering::SeqCst) {
            return Err(HwError::Bus);
        }
        Ok(())
    }

    fn record(&self, call: HwCall) {
        self.0.calls.lock().unwrap().push(call);
    }
}

impl FlashHardware for MockFlashHw {
    fn set_strobe(&self, on: bool) -> Result<(), HwError> {
        self.check()?;
        self.record(HwCall::SetStrobe(on));
        self.0.strobe.store(on, Ordering::SeqCst);
        Ok(())
    }

    fn strobe(&self) -> Result<bool, HwError> {
        self.check()?;
        Ok(self.0.strobe.load(Ordering::SeqCst))
    }

    fn brightness(&self) -> Result<u32, HwError> {
        self.check()?;
        Ok(self.0.brightness.load(Ordering::SeqCst))
    }

    fn set_brightness(&self, val: u32) -> Result<u32, HwError> {
        self.check()?;
        self.record(HwCall::SetBrightness(val));
        self.0.brightness.store(val, Ordering::SeqCst);
        Ok(val)
    }

    fn faults(&self) -> Result<u32, HwError> {
        self.check()?;
        Ok(self.0.faults.load(Ordering::SeqCst))
    }

    fn set_timeout(&self, us: u32) -> Result<u32, HwError> {
        self.check()?;
        let out_of_window = !(TIMEOUT_MIN_US..=TIMEOUT_MAX_US).contains(&us);
        if out_of_window && self.0.reject_out_of_range.load(Ordering::SeqCst) {
            return Err(HwError::OutOfRange);
        }
        let accepted = us.clamp(TIMEOUT_MIN_US, TIMEOUT_MAX_US);
        self.record(HwCall::SetTimeout(accepted));
        Ok(accepted)
    }
}
