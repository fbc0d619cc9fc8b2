//! Pin wiring and protocol timing.

use crate::dio::Port;

/// A single GPIO line, addressed by port and pin number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DioPin {
    pub port: Port,
    pub pin: u8,
}

impl DioPin {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }
}

/// Wiring of the six lines the display is driven through. R/W is tied low in hardware.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdPins {
    pub rs: DioPin,
    pub e: DioPin,
    pub d4: DioPin,
    pub d5: DioPin,
    pub d6: DioPin,
    pub d7: DioPin,
}

impl Default for LcdPins {
    /// Panel board wiring: RS on PA3, E on PA2, data on PB0, PB1, PB2 and PB4.
    fn default() -> Self {
        Self {
            rs: DioPin::new(Port::A, 3),
            e: DioPin::new(Port::A, 2),
            d4: DioPin::new(Port::B, 0),
            d5: DioPin::new(Port::B, 1),
            d6: DioPin::new(Port::B, 2),
            d7: DioPin::new(Port::B, 4),
        }
    }
}

impl LcdPins {
    pub fn with_rs(mut self, port: Port, pin: u8) -> Self {
        self.rs = DioPin::new(port, pin);
        self
    }

    pub fn with_enable(mut self, port: Port, pin: u8) -> Self {
        self.e = DioPin::new(port, pin);
        self
    }

    /// Set the data lines D4..D7, in that order.
    pub fn with_data(mut self, data: [DioPin; 4]) -> Self {
        let [d4, d5, d6, d7] = data;
        self.d4 = d4;
        self.d5 = d5;
        self.d6 = d6;
        self.d7 = d7;
        self
    }

    /// Data lines in bit order, bit 0 drives D4.
    pub(crate) fn data(&self) -> [DioPin; 4] {
        [self.d4, self.d5, self.d6, self.d7]
    }

    /// Every line the driver configures as output, control lines first.
    pub(crate) fn all(&self) -> [DioPin; 6] {
        [self.rs, self.e, self.d4, self.d5, self.d6, self.d7]
    }
}

/// Fixed delays of the open-loop protocol. The busy flag is never read back, so these are
/// the only thing keeping host and controller in step.
pub mod timing {
    /// Supply settle time before the first nibble.
    pub const POWER_UP_MS: u32 = 35;
    /// Enable held high per nibble. Far above the controller minimum.
    pub const ENABLE_PULSE_MS: u32 = 1;
    /// After function set and display control during init.
    pub const COMMAND_US: u32 = 45;
    /// Clear display is the slowest instruction.
    pub const CLEAR_MS: u32 = 2;
    pub const CGRAM_ADDRESS_US: u32 = 50;
    pub const CGRAM_BYTE_US: u32 = 100;
    /// Between single shift steps, slow enough to watch.
    pub const SHIFT_STEP_MS: u32 = 200;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_default_wiring() {
        let pins = LcdPins::default()
            .with_rs(Port::C, 0)
            .with_enable(Port::C, 1)
            .with_data([
                DioPin::new(Port::D, 4),
                DioPin::new(Port::D, 5),
                DioPin::new(Port::D, 6),
                DioPin::new(Port::D, 7),
            ]);
        assert_eq!(pins.rs, DioPin::new(Port::C, 0));
        assert_eq!(pins.e, DioPin::new(Port::C, 1));
        assert_eq!(pins.data()[0], DioPin::new(Port::D, 4));
        assert_eq!(pins.all()[5], DioPin::new(Port::D, 7));
    }

    #[test]
    fn default_wiring_skips_pb3() {
        let pins = LcdPins::default();
        assert_eq!(pins.d6, DioPin::new(Port::B, 2));
        assert_eq!(pins.d7, DioPin::new(Port::B, 4));
    }
}
