//! Integration tests: text control endpoint over the attribute tables.

use multiled::{
    ErrorClass, FlashConfig, FlashLed, MulticolorConfig, MulticolorLed, flash_attrs,
    multicolor_attrs,
};

use crate::mock_hw::MockFlashHw;

fn flash_device() -> (FlashLed<MockFlashHw>, MockFlashHw) {
    let hw = MockFlashHw::new();
    let led = FlashLed::new(hw.clone(), FlashConfig::default()).unwrap();
    (led, hw)
}

#[test]
fn strobe_write_then_read_over_text() {
    let table = flash_attrs::<MockFlashHw>();
    let (led, _hw) = flash_device();

    table.write(&led, "flash_strobe", "1\n").unwrap();
    assert_eq!(table.read(&led, "flash_strobe").unwrap().as_str(), "1\n");
}

#[test]
fn timeout_write_then_read_over_text() {
    let table = flash_attrs::<MockFlashHw>();
    let (led, _hw) = flash_device();

    table.write(&led, "flash_timeout", "250000").unwrap();
    assert_eq!(table.read(&led, "flash_timeout").unwrap().as_str(), "250000\n");
    assert_eq!(
        table.read(&led, "max_flash_timeout").unwrap().as_str(),
        "820000\n"
    );
}

#[test]
fn fault_read_renders_the_name_list() {
    let table = flash_attrs::<MockFlashHw>();
    let (led, hw) = flash_device();

    hw.set_faults(0b101);
    assert_eq!(
        table.read(&led, "flash_fault").unwrap().as_str(),
        "led-over-voltage controller-over-temperature\n"
    );
}

#[test]
fn error_classes_match_the_transport_contract() {
    let table = flash_attrs::<MockFlashHw>();
    let (led, hw) = flash_device();

    // Malformed input → invalid-argument class.
    let err = table.write(&led, "flash_timeout", "abc").unwrap_err();
    assert_eq!(err.class(), ErrorClass::InvalidArgument);

    // Administratively disabled → busy class.
    led.set_disabled(true);
    let err = table.write(&led, "flash_strobe", "1").unwrap_err();
    assert_eq!(err.class(), ErrorClass::Busy);
    led.set_disabled(false);

    // Callback failure → I/O class.
    hw.fail_all(true);
    let err = table.read(&led, "flash_fault").unwrap_err();
    assert_eq!(err.class(), ErrorClass::Io);
}

#[test]
fn multicolor_surface_over_text() {
    let table = multicolor_attrs();
    let dev = MulticolorLed::new(MulticolorConfig::default()).unwrap();

    table.write(&dev, "multi_intensity", "10 50 100").unwrap();
    table.write(&dev, "brightness", "255").unwrap();

    let snapshot = dev.snapshot();
    let levels: Vec<u32> = snapshot.channels.iter().map(|c| c.brightness).collect();
    // max_brightness is 255, so full scale reproduces the weights.
    assert_eq!(levels, vec![10, 50, 100]);

    assert_eq!(table.read(&dev, "multi_index").unwrap().as_str(), "red green blue\n");
    assert_eq!(table.read(&dev, "max_brightness").unwrap().as_str(), "255\n");
}

#[test]
fn attribute_tables_expose_the_registered_names() {
    let flash = flash_attrs::<MockFlashHw>();
    let names: Vec<_> = flash.names().collect();
    assert_eq!(
        names,
        vec![
            "flash_brightness",
            "max_flash_brightness",
            "flash_strobe",
            "flash_timeout",
            "max_flash_timeout",
            "flash_fault",
        ]
    );

    let mc = multicolor_attrs();
    assert!(mc.names().any(|n| n == "multi_intensity"));
}
