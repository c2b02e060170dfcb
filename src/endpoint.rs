//! Control endpoint attribute registry.
//!
//! **Transport-decoupled**: the registry owns no transport. The external
//! control endpoint resolves a request to a device record and a table,
//! feeds the attribute name (plus the raw text payload for writes) in,
//! and receives a formatted line or a typed error back.
//!
//! Attribute wiring is an explicit table built once at
//! device-registration time — a name maps to an optional read handler
//! and an optional write handler. The text codec here performs shape
//! validation only (parse success, {0,1} strobe domain, non-negative
//! integers); every range and device-state decision belongs to the
//! device core and the hardware behind it.

use core::fmt::Write as _;

use crate::error::{Error, Result};
use crate::flash::{FaultSet, FlashLed};
use crate::multicolor::{MAX_CHANNELS, MulticolorLed};
use crate::ports::FlashHardware;

/// Output line capacity: covers the widest defined read, a full
/// nine-name fault list.
pub const LINE_CAP: usize = 256;

/// One formatted endpoint line, newline-terminated.
pub type Line = heapless::String<LINE_CAP>;

const MAX_ATTRS: usize = 8;

/// Read handler: formats one newline-terminated output line.
pub type ReadFn<D> = fn(&D) -> Result<Line>;
/// Write handler: parses the raw text payload and applies it.
pub type WriteFn<D> = fn(&D, &str) -> Result<()>;

/// A named attribute with its read/write handlers.
pub struct Attribute<D> {
    name: &'static str,
    read: Option<ReadFn<D>>,
    write: Option<WriteFn<D>>,
}

impl<D> Attribute<D> {
    pub const fn rw(name: &'static str, read: ReadFn<D>, write: WriteFn<D>) -> Self {
        Self {
            name,
            read: Some(read),
            write: Some(write),
        }
    }

    pub const fn ro(name: &'static str, read: ReadFn<D>) -> Self {
        Self {
            name,
            read: Some(read),
            write: None,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Attribute lookup table for one device class.
pub struct AttrTable<D> {
    attrs: heapless::Vec<Attribute<D>, MAX_ATTRS>,
}

impl<D> AttrTable<D> {
    /// Read an attribute. A failed read produces no output, only the
    /// error.
    pub fn read(&self, dev: &D, name: &str) -> Result<Line> {
        let attr = self.find(name)?;
        let read = attr
            .read
            .ok_or(Error::InvalidArgument("attribute is write-only"))?;
        read(dev)
    }

    /// Write an attribute from its raw text payload. A failed write
    /// leaves stored device state unchanged.
    pub fn write(&self, dev: &D, name: &str, input: &str) -> Result<()> {
        let attr = self.find(name)?;
        let write = attr
            .write
            .ok_or(Error::InvalidArgument("attribute is read-only"))?;
        write(dev, input)
    }

    /// Registered attribute names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attrs.iter().map(Attribute::name)
    }

    fn find(&self, name: &str) -> Result<&Attribute<D>> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .ok_or(Error::InvalidArgument("unknown attribute"))
    }

    fn from_attrs(attrs: &mut dyn Iterator<Item = Attribute<D>>) -> Self {
        let mut table = heapless::Vec::new();
        for attr in attrs {
            let _ = table.push(attr);
        }
        Self { attrs: table }
    }
}

// ---------------------------------------------------------------------------
// Table builders
// ---------------------------------------------------------------------------

/// Attribute table for a flash LED device.
pub fn flash_attrs<H: FlashHardware>() -> AttrTable<FlashLed<H>> {
    AttrTable::from_attrs(
        &mut [
            Attribute::rw(
                "flash_brightness",
                |d: &FlashLed<H>| Ok(int_line(d.brightness()?)),
                |d, s| d.set_brightness(parse_u32(s)?),
            ),
            Attribute::ro("max_flash_brightness", |d: &FlashLed<H>| {
                Ok(int_line(d.max_brightness()))
            }),
            Attribute::rw(
                "flash_strobe",
                |d: &FlashLed<H>| Ok(int_line(u32::from(d.strobe()?))),
                |d, s| d.set_strobe(parse_bool01(s)?),
            ),
            Attribute::rw(
                "flash_timeout",
                |d: &FlashLed<H>| Ok(int_line(d.timeout())),
                |d, s| d.set_timeout(parse_u32(s)?),
            ),
            Attribute::ro("max_flash_timeout", |d: &FlashLed<H>| {
                Ok(int_line(d.max_timeout()))
            }),
            Attribute::ro("flash_fault", |d: &FlashLed<H>| Ok(fault_line(d.faults()?))),
        ]
        .into_iter(),
    )
}

/// Attribute table for a multicolor LED device.
pub fn multicolor_attrs() -> AttrTable<MulticolorLed> {
    AttrTable::from_attrs(
        &mut [
            Attribute::rw(
                "brightness",
                |d: &MulticolorLed| Ok(int_line(d.brightness())),
                |d, s| {
                    // The core leaves clamping to its caller; this is
                    // that caller.
                    let v = parse_u32(s)?;
                    d.set_brightness(v.min(d.max_brightness()));
                    Ok(())
                },
            ),
            Attribute::ro("max_brightness", |d: &MulticolorLed| {
                Ok(int_line(d.max_brightness()))
            }),
            Attribute::rw(
                "multi_intensity",
                |d: &MulticolorLed| {
                    let snapshot = d.snapshot();
                    Ok(list_line(
                        snapshot.channels.iter().map(|ch| ch.intensity),
                    ))
                },
                |d, s| {
                    let values = parse_intensities(s, d.num_channels())?;
                    d.set_intensities(&values)
                },
            ),
            Attribute::ro("multi_index", |d: &MulticolorLed| {
                let mut line = Line::new();
                for (i, color) in d.colors().iter().enumerate() {
                    if i > 0 {
                        let _ = line.push(' ');
                    }
                    let _ = line.push_str(color.as_str());
                }
                let _ = line.push('\n');
                Ok(line)
            }),
        ]
        .into_iter(),
    )
}

// ---------------------------------------------------------------------------
// Text codec
// ---------------------------------------------------------------------------

/// Parse a single non-negative decimal integer. Signs, garbage, and
/// empty input all fail the same way.
fn parse_u32(input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidArgument("expected a non-negative decimal integer"))
}

/// Parse the strobe domain: exactly 0 or 1.
fn parse_bool01(input: &str) -> Result<bool> {
    match parse_u32(input)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Error::InvalidArgument("expected 0 or 1")),
    }
}

/// Parse a whitespace-separated intensity list; the token count must
/// equal the device's channel count.
fn parse_intensities(
    input: &str,
    expected: usize,
) -> Result<heapless::Vec<u32, MAX_CHANNELS>> {
    let mut values = heapless::Vec::new();
    for token in input.split_whitespace() {
        let v = token
            .parse::<u32>()
            .map_err(|_| Error::InvalidArgument("expected a non-negative decimal integer"))?;
        values
            .push(v)
            .map_err(|_| Error::InvalidArgument("intensity count mismatch"))?;
    }
    if values.len() != expected {
        return Err(Error::InvalidArgument("intensity count mismatch"));
    }
    Ok(values)
}

fn int_line(v: u32) -> Line {
    let mut line = Line::new();
    let _ = writeln!(line, "{v}");
    line
}

fn list_line(values: impl Iterator<Item = u32>) -> Line {
    let mut line = Line::new();
    for (i, v) in values.enumerate() {
        if i > 0 {
            let _ = line.push(' ');
        }
        let _ = write!(line, "{v}");
    }
    let _ = line.push('\n');
    line
}

/// Fault names joined by a single space, newline-terminated; an empty
/// set renders a bare newline.
fn fault_line(set: FaultSet) -> Line {
    let mut line = Line::new();
    for (i, name) in set.names().iter().enumerate() {
        if i > 0 {
            let _ = line.push(' ');
        }
        let _ = line.push_str(name);
    }
    let _ = line.push('\n');
    line
}
