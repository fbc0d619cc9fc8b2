//! LM35 analog temperature sensor: 10 mV per degree Celsius on an ADC channel of port A.

use crate::dio::{Dio, Direction, Port};

/// Single-shot conversion on one of the MCU's ADC channels. The MCU's ADC is 10-bit and
/// referenced to 5 V (AVCC).
pub trait Adc {
    type Error;

    /// Blocking conversion of `channel` (0..=7), right adjusted.
    fn read(&mut self, channel: u8) -> Result<u16, Self::Error>;
}

const VREF_MV: f32 = 5000.0;
const FULL_SCALE: f32 = 1024.0;
const MV_PER_DEGREE: f32 = 10.0;

/// Channel the panel board wires the sensor to.
pub const DEFAULT_CHANNEL: u8 = 1;

pub struct Lm35<'a, A>
where
    A: Adc,
{
    adc: &'a mut A,
    channel: u8,
}

impl<'a, A> Lm35<'a, A>
where
    A: Adc,
{
    pub fn new(adc: &'a mut A) -> Self {
        Self {
            adc,
            channel: DEFAULT_CHANNEL,
        }
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// ADC channels share port A, the pin has to be an input before sampling.
    pub fn init<P: Dio>(&mut self, dio: &mut P) -> Result<(), P::Error> {
        dio.set_pin_direction(Port::A, self.channel, Direction::Input)
    }

    pub fn temperature_celsius(&mut self) -> Result<f32, A::Error> {
        let raw = self.adc.read(self.channel)?;
        trace!("lm35 raw {}", raw);
        Ok(celsius_from_raw(raw))
    }
}

/// Convert a raw 10-bit reading to degrees Celsius.
pub fn celsius_from_raw(raw: u16) -> f32 {
    let millivolts = raw as f32 * VREF_MV / FULL_SCALE;
    millivolts / MV_PER_DEGREE
}
