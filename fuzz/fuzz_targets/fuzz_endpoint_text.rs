//! Fuzz target: control-endpoint text writes.
//!
//! Drives arbitrary text into every writable attribute of both device
//! classes and asserts that the parser never panics and that a rejected
//! write leaves stored state untouched.
//!
//! cargo fuzz run fuzz_endpoint_text

#![no_main]

use libfuzzer_sys::fuzz_target;
use multiled::{
    FlashConfig, FlashHardware, FlashLed, HwError, MulticolorConfig, MulticolorLed,
    flash_attrs, multicolor_attrs,
};

#[derive(Clone, Default)]
struct AcceptAllHw;

impl FlashHardware for AcceptAllHw {
    fn set_strobe(&self, _on: bool) -> Result<(), HwError> {
        Ok(())
    }
    fn strobe(&self) -> Result<bool, HwError> {
        Ok(false)
    }
    fn brightness(&self) -> Result<u32, HwError> {
        Ok(0)
    }
    fn set_brightness(&self, val: u32) -> Result<u32, HwError> {
        Ok(val)
    }
    fn faults(&self) -> Result<u32, HwError> {
        Ok(0)
    }
    fn set_timeout(&self, us: u32) -> Result<u32, HwError> {
        Ok(us)
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let flash_table = flash_attrs::<AcceptAllHw>();
    let led = FlashLed::new(AcceptAllHw, FlashConfig::default()).unwrap();
    let stored_timeout = led.timeout();

    for attr in ["flash_strobe", "flash_timeout", "flash_brightness"] {
        if flash_table.write(&led, attr, text).is_err() && attr == "flash_timeout" {
            // A rejected write must not move the stored value.
            assert_eq!(led.timeout(), stored_timeout);
        }
        let _ = flash_table.read(&led, attr);
    }
    let _ = flash_table.read(&led, text);

    let mc_table = multicolor_attrs();
    let dev = MulticolorLed::new(MulticolorConfig::default()).unwrap();
    let _ = mc_table.write(&dev, "multi_intensity", text);
    let _ = mc_table.write(&dev, "brightness", text);
    let _ = mc_table.read(&dev, text);
});
