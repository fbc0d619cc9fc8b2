//! Digital I/O contract consumed by the drivers.
//!
//! The MCU exposes four 8-bit GPIO ports. Drivers never touch registers themselves, they go
//! through an implementation of [`Dio`] which the board support code provides. Tests use a
//! simulated backend that records every call.

/// One of the four 8-bit GPIO ports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level of bit `bit` in `value`.
    pub fn of_bit(value: u8, bit: u8) -> Self {
        Level::from((value >> bit) & 1 == 1)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin level access keyed by port and pin number (0..=7).
///
/// Implementations are expected to silently ignore pin numbers above 7, the same way the
/// register-level driver does. The drivers in this crate cannot detect that case.
pub trait Dio {
    type Error;

    fn set_pin_direction(&mut self, port: Port, pin: u8, direction: Direction)
        -> Result<(), Self::Error>;

    fn set_pin_value(&mut self, port: Port, pin: u8, level: Level) -> Result<(), Self::Error>;

    fn get_pin_value(&mut self, port: Port, pin: u8) -> Result<Level, Self::Error>;
}
