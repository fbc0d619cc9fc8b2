//! Four-digit 7-segment display behind a BCD decoder, multiplexed through active-low common
//! lines. Digit 1 is the rightmost (ones), digit 4 the leftmost (thousands).

use embedded_hal::delay::DelayNs;

use crate::config::DioPin;
use crate::dio::{Dio, Direction, Level, Port};

/// Time a digit stays lit in [`SevenSegment::display_digit`].
const DIGIT_HOLD_MS: u32 = 1;
/// Gap between digits while refreshing a number.
const DIGIT_GAP_MS: u32 = 2;
/// Refresh rounds per [`SevenSegment::display_number`] call.
const REFRESH_ROUNDS: u8 = 50;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SevenSegmentPins {
    /// Decoder inputs A..D, bit 0 first.
    pub bcd: [DioPin; 4],
    /// Common lines of digits 1..4.
    pub common: [DioPin; 4],
}

impl Default for SevenSegmentPins {
    /// BCD on PB0, PB1, PB2, PB4 (shared with the LCD data bus), commons on PA3, PA2, PB5, PB6.
    fn default() -> Self {
        Self {
            bcd: [
                DioPin::new(Port::B, 0),
                DioPin::new(Port::B, 1),
                DioPin::new(Port::B, 2),
                DioPin::new(Port::B, 4),
            ],
            common: [
                DioPin::new(Port::A, 3),
                DioPin::new(Port::A, 2),
                DioPin::new(Port::B, 5),
                DioPin::new(Port::B, 6),
            ],
        }
    }
}

pub struct SevenSegment<'a, P, D>
where
    P: Dio,
    D: DelayNs,
{
    dio: &'a mut P,
    delay: &'a mut D,
    pins: SevenSegmentPins,
}

impl<'a, P, D> SevenSegment<'a, P, D>
where
    P: Dio,
    D: DelayNs,
{
    pub fn new(dio: &'a mut P, delay: &'a mut D) -> Self {
        Self {
            dio,
            delay,
            pins: SevenSegmentPins::default(),
        }
    }

    pub fn with_pins(mut self, pins: SevenSegmentPins) -> Self {
        self.pins = pins;
        self
    }

    /// Configure decoder and common lines as outputs with every digit off.
    pub fn init(mut self) -> Result<Self, P::Error> {
        for DioPin { port, pin } in self.pins.bcd.into_iter().chain(self.pins.common) {
            self.dio.set_pin_direction(port, pin, Direction::Output)?;
        }
        self.disable()?;
        Ok(self)
    }

    /// Light `value` on digit `position` (1..=4) for a moment, then blank everything.
    /// Values above 9 are ignored. An unknown position still drives the decoder but lights
    /// nothing.
    pub fn display_digit(&mut self, position: u8, value: u8) -> Result<(), P::Error> {
        if value > 9 {
            return Ok(());
        }
        for (bit, line) in self.pins.bcd.into_iter().enumerate() {
            self.dio
                .set_pin_value(line.port, line.pin, Level::of_bit(value, bit as u8))?;
        }
        if let Some(common) = position
            .checked_sub(1)
            .and_then(|i| self.pins.common.get(i as usize).copied())
        {
            self.dio.set_pin_value(common.port, common.pin, Level::Low)?;
        }
        self.delay.delay_ms(DIGIT_HOLD_MS);
        self.disable()
    }

    /// Multiplex `number` across the four digits for a fixed number of refresh rounds.
    /// Anything above 9999 is ignored.
    pub fn display_number(&mut self, number: u16) -> Result<(), P::Error> {
        if number > 9999 {
            return Ok(());
        }
        let digits = [
            (number % 10) as u8,
            (number / 10 % 10) as u8,
            (number / 100 % 10) as u8,
            (number / 1000 % 10) as u8,
        ];
        for _ in 0..REFRESH_ROUNDS {
            for position in (1..=4u8).rev() {
                self.display_digit(position, digits[position as usize - 1])?;
                self.delay.delay_ms(DIGIT_GAP_MS);
            }
        }
        Ok(())
    }

    /// Drive every common line high.
    pub fn disable(&mut self) -> Result<(), P::Error> {
        for DioPin { port, pin } in self.pins.common {
            self.dio.set_pin_value(port, pin, Level::High)?;
        }
        Ok(())
    }
}
