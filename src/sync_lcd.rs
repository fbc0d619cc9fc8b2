use embedded_hal::delay::DelayNs;

use ufmt_write::uWrite;

use crate::config::{timing, DioPin, LcdPins};
use crate::dio::{Dio, Direction, Level};
use crate::encode::{self, Digits};
use crate::{
    DisplayControl, EntryMode, FunctionSet, Instruction, Line, Mode, ShiftDirection, ShiftTarget,
};

/// API to write to the LCD.
///
/// Holding an `Lcd` returned by [`Lcd::init`] means the controller went through its power-on
/// sequence. There is no teardown, the controller keeps its state until power is removed.
pub struct Lcd<'a, P, D>
where
    P: Dio,
    D: DelayNs,
{
    dio: &'a mut P,
    delay: &'a mut D,
    pins: LcdPins,
}

impl<'a, P, D> Lcd<'a, P, D>
where
    P: Dio,
    D: DelayNs,
{
    /// Create new instance with the default board wiring.
    pub fn new(dio: &'a mut P, delay: &'a mut D) -> Self {
        Self {
            dio,
            delay,
            pins: LcdPins::default(),
        }
    }

    pub fn with_pins(mut self, pins: LcdPins) -> Self {
        self.pins = pins;
        self
    }

    /// Runs the HD44780 power-on sequence for 4-bit mode: two lines, 5x8 font, display on
    /// with blinking cursor, cleared, cursor auto-increment.
    ///
    /// The order and the delays are fixed. The lone `0b0010` nibble is what switches the
    /// controller out of 8-bit detection, sending it as a full byte would not.
    pub fn init(mut self) -> Result<Self, P::Error> {
        for DioPin { port, pin } in self.pins.all() {
            self.dio.set_pin_direction(port, pin, Direction::Output)?;
        }

        self.delay.delay_ms(timing::POWER_UP_MS);

        self.set_line(self.pins.rs, Level::Low)?;
        self.write_half_port(Instruction::FunctionSet as u8 >> 4)?;
        self.pulse_enable()?;

        self.command(
            Instruction::FunctionSet as u8 | FunctionSet::Bits4 as u8 | FunctionSet::TwoLines as u8,
        )?;
        self.delay.delay_us(timing::COMMAND_US);

        self.command(
            Instruction::DisplayControl as u8
                | DisplayControl::DisplayOn as u8
                | DisplayControl::CursorOn as u8
                | DisplayControl::CursorBlink as u8,
        )?;
        self.delay.delay_us(timing::COMMAND_US);

        self.command(Instruction::Clear as u8)?;
        self.delay.delay_ms(timing::CLEAR_MS);

        self.command(Instruction::EntryMode as u8 | EntryMode::Increment as u8)?;
        debug!("lcd ready, pins {}", self.pins);
        Ok(self)
    }

    fn set_line(&mut self, line: DioPin, level: Level) -> Result<(), P::Error> {
        self.dio.set_pin_value(line.port, line.pin, level)
    }

    /// Present bits 0..=3 of `value` on D4..D7. Upper bits are ignored.
    fn write_half_port(&mut self, value: u8) -> Result<(), P::Error> {
        for (bit, line) in self.pins.data().into_iter().enumerate() {
            self.set_line(line, Level::of_bit(value, bit as u8))?;
        }
        Ok(())
    }

    /// Latch the nibble currently on the data lines.
    fn pulse_enable(&mut self) -> Result<(), P::Error> {
        self.set_line(self.pins.e, Level::High)?;
        self.delay.delay_ms(timing::ENABLE_PULSE_MS);
        self.set_line(self.pins.e, Level::Low)
    }

    /// One transaction: RS, high nibble, pulse, low nibble, pulse.
    fn send(&mut self, data: u8, mode: Mode) -> Result<(), P::Error> {
        let rs = match mode {
            Mode::Cmd => Level::Low,
            Mode::Data => Level::High,
        };
        self.set_line(self.pins.rs, rs)?;
        self.write_half_port(data >> 4)?;
        self.pulse_enable()?;
        self.write_half_port(data)?;
        self.pulse_enable()
    }

    /// Send a raw instruction byte.
    pub fn command(&mut self, data: u8) -> Result<(), P::Error> {
        self.send(data, Mode::Cmd)
    }

    /// Write one character code at the cursor, which then advances.
    pub fn write_char(&mut self, data: u8) -> Result<(), P::Error> {
        self.send(data, Mode::Data)
    }

    /// Clear the display and return the cursor home.
    pub fn clear(&mut self) -> Result<(), P::Error> {
        self.command(Instruction::Clear as u8)?;
        self.delay.delay_ms(timing::CLEAR_MS);
        Ok(())
    }

    /// Shift the cursor or the whole display `times` cells, pausing after each step.
    pub fn shift(
        &mut self,
        target: ShiftTarget,
        direction: ShiftDirection,
        times: u8,
    ) -> Result<(), P::Error> {
        let cmd = Instruction::Shift as u8 | target as u8 | direction as u8;
        for _ in 0..times {
            self.command(cmd)?;
            self.delay.delay_ms(timing::SHIFT_STEP_MS);
        }
        Ok(())
    }

    /// [`shift`](Self::shift) with the raw S/C and R/L bits. Anything other than 0 or 1 in
    /// either selector does nothing.
    pub fn shift_raw(&mut self, sc: u8, rl: u8, times: u8) -> Result<(), P::Error> {
        match (ShiftTarget::from_bit(sc), ShiftDirection::from_bit(rl)) {
            (Some(target), Some(direction)) => self.shift(target, direction, times),
            _ => {
                warn!("ignoring shift selector sc={} rl={}", sc, rl);
                Ok(())
            }
        }
    }

    /// Move the cursor to `cell` of `line` (1 to 4). Any other line is ignored and the cursor
    /// stays put. `cell` is not checked against the display width.
    pub fn go_to(&mut self, line: u8, cell: u8) -> Result<(), P::Error> {
        match Line::from_number(line) {
            Some(line) => self.command(
                (Instruction::DdramAddr as u8)
                    .wrapping_add(line.ddram_base())
                    .wrapping_add(cell),
            ),
            None => {
                warn!("ignoring cursor move to line {}", line);
                Ok(())
            }
        }
    }

    /// Move to (`line`, `cell`) and blank `count` cells. The cursor is left after the blanks.
    pub fn go_to_clear(&mut self, line: u8, cell: u8, count: u8) -> Result<(), P::Error> {
        self.go_to(line, cell)?;
        for _ in 0..count {
            self.write_char(b' ')?;
        }
        Ok(())
    }

    /// Store a 5x8 glyph in CGRAM `slot` (0 to 7), one byte per row, low five bits used.
    /// Afterwards `write_char(slot)` shows it.
    ///
    /// Switching back to DDRAM leaves the cursor at line 1, cell 0.
    pub fn create_character(&mut self, bitmap: &[u8; 8], slot: u8) -> Result<(), P::Error> {
        if slot > 7 {
            warn!("ignoring CGRAM slot {}", slot);
            return Ok(());
        }
        trace!("programming CGRAM slot {}", slot);

        self.command(Instruction::CgramAddr as u8 + slot * 8)?;
        self.delay.delay_us(timing::CGRAM_ADDRESS_US);
        // CGRAM address auto-increments, one row per write.
        for &row in bitmap {
            self.write_char(row)?;
            self.delay.delay_us(timing::CGRAM_BYTE_US);
        }

        self.command(Instruction::DdramAddr as u8)?;
        self.delay.delay_us(timing::CGRAM_BYTE_US);
        Ok(())
    }

    /// Write string to display, one byte per cell.
    pub fn write_str(&mut self, data: &str) -> Result<(), P::Error> {
        self.write_bytes(data.as_bytes())
    }

    /// Write raw character codes, e.g. CGRAM slots or the controller's ROM glyphs above 0x7f.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), P::Error> {
        for &c in data {
            self.write_char(c)?;
        }
        Ok(())
    }

    /// Write up to the first NUL. `None` writes nothing.
    pub fn write_cstr(&mut self, data: Option<&[u8]>) -> Result<(), P::Error> {
        match data {
            Some(data) => {
                let end = data.iter().position(|&c| c == 0).unwrap_or(data.len());
                self.write_bytes(&data[..end])
            }
            None => Ok(()),
        }
    }

    fn write_digits(&mut self, digits: Digits) -> Result<(), P::Error> {
        self.write_bytes(digits.as_bytes())
    }

    /// Signed decimal, no leading zeros.
    pub fn write_number(&mut self, value: i32) -> Result<(), P::Error> {
        self.write_digits(encode::decimal(value))
    }

    /// Always four digits. Above 9999 only the low four digits are shown.
    pub fn write_number_4_digits(&mut self, value: u16) -> Result<(), P::Error> {
        self.write_digits(encode::four_digits(value))
    }

    /// All eight bits as `0`/`1`.
    pub fn write_binary(&mut self, value: u8) -> Result<(), P::Error> {
        self.write_digits(encode::binary(value))
    }

    /// Binary without leading zeros. Zero writes nothing at all.
    pub fn write_binary_short(&mut self, value: u8) -> Result<(), P::Error> {
        self.write_digits(encode::binary_short(value))
    }

    pub fn write_hex(&mut self, value: u8) -> Result<(), P::Error> {
        self.write_digits(encode::hex(value))
    }

    /// Three decimal places, truncated. See [`encode::float`] for the precision caveats.
    pub fn write_float(&mut self, value: f32) -> Result<(), P::Error> {
        self.write_digits(encode::float(value))
    }
}

impl<'a, P, D> uWrite for Lcd<'a, P, D>
where
    P: Dio,
    D: DelayNs,
{
    type Error = P::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_str(s)
    }
}
