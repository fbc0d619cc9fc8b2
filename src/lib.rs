#![no_std]
//! Drivers for a small AVR instrument panel: an HD44780 compatible character LCD wired in
//! 4-bit mode, a multiplexed 4-digit 7-segment display and an LM35 temperature sensor.
//!
//! Nothing here touches registers. GPIO goes through an implementation of [`dio::Dio`]
//! (port/pin addressed, like the MCU's DIO layer), waiting goes through
//! [`embedded_hal::delay::DelayNs`], and the LM35 reads through [`lm35::Adc`].
//!
//! Usage:
//! ```ignore
//! let mut dio = board::Dio::new();       // implements avr_panel_hal::dio::Dio
//! let mut delay = arduino_hal::Delay::new();
//!
//! let mut lcd = avr_panel_hal::Lcd::new(&mut dio, &mut delay)
//!     .with_pins(avr_panel_hal::LcdPins::default())
//!     .init()?;
//! lcd.go_to(1, 0)?;
//! lcd.write_str("Temp ")?;
//! lcd.write_float(23.5)?;
//! ```
//!
//! The controller is driven open loop: the busy flag is never read and every step waits a
//! fixed time (see [`config::timing`]). A delay that returns early corrupts the protocol and
//! nothing will notice. The six LCD lines must not be driven by anything else while a
//! transaction is in flight.

#[macro_use]
mod fmt;

pub mod config;
pub mod dio;
pub mod encode;
pub mod lm35;
pub mod seven_segment;
pub mod sync_lcd;

#[cfg(test)]
mod testing;

pub use config::{DioPin, LcdPins};
pub use lm35::Lm35;
pub use seven_segment::SevenSegment;
pub use sync_lcd::Lcd;

/// Register select: instruction or character data.
#[derive(Copy, Clone)]
enum Mode {
    Cmd,
    Data,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum Instruction {
    Clear = 0x01,
    EntryMode = 0x04,
    DisplayControl = 0x08,
    Shift = 0x10,
    FunctionSet = 0x20,
    CgramAddr = 0x40,
    DdramAddr = 0x80,
}

enum FunctionSet {
    Bits4 = 0x00,
    TwoLines = 0x08,
}

enum DisplayControl {
    CursorBlink = 0x01,
    CursorOn = 0x02,
    DisplayOn = 0x04,
}

enum EntryMode {
    Increment = 0x02,
}

/// What a shift instruction moves.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftTarget {
    Cursor = 0x00,
    Display = 0x08,
}

impl ShiftTarget {
    /// From the S/C bit: 0 cursor, 1 display.
    pub fn from_bit(sc: u8) -> Option<Self> {
        match sc {
            0 => Some(ShiftTarget::Cursor),
            1 => Some(ShiftTarget::Display),
            _ => None,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftDirection {
    Left = 0x00,
    Right = 0x04,
}

impl ShiftDirection {
    /// From the R/L bit: 0 left, 1 right.
    pub fn from_bit(rl: u8) -> Option<Self> {
        match rl {
            0 => Some(ShiftDirection::Left),
            1 => Some(ShiftDirection::Right),
            _ => None,
        }
    }
}

/// Display line of a 4x20 module.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    One,
    Two,
    Three,
    Four,
}

impl Line {
    /// Lines are numbered from 1.
    pub fn from_number(line: u8) -> Option<Self> {
        match line {
            1 => Some(Line::One),
            2 => Some(Line::Two),
            3 => Some(Line::Three),
            4 => Some(Line::Four),
            _ => None,
        }
    }

    /// DDRAM offset of the first cell. Lines 3 and 4 continue lines 1 and 2 of the
    /// controller's two-line memory map, hence 0x14 and 0x54.
    pub const fn ddram_base(self) -> u8 {
        match self {
            Line::One => 0x00,
            Line::Two => 0x40,
            Line::Three => 0x14,
            Line::Four => 0x54,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_numbers() {
        assert_eq!(Line::from_number(0), None);
        assert_eq!(Line::from_number(3).map(Line::ddram_base), Some(0x14));
        assert_eq!(Line::from_number(4).map(Line::ddram_base), Some(0x54));
        assert_eq!(Line::from_number(5), None);
    }

    #[test]
    fn shift_selectors() {
        assert_eq!(ShiftTarget::from_bit(1), Some(ShiftTarget::Display));
        assert_eq!(ShiftDirection::from_bit(0), Some(ShiftDirection::Left));
        assert_eq!(ShiftTarget::from_bit(2), None);
        assert_eq!(ShiftDirection::from_bit(9), None);
    }
}
