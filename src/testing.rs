//! Simulated DIO backend and delay that record into one shared log, plus a decoder that turns
//! enable-pulse latches back into controller transactions.
extern crate std;

use core::cell::RefCell;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use std::rc::Rc;
use std::vec::Vec;

use crate::config::{DioPin, LcdPins};
use crate::dio::{Dio, Direction, Level, Port};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Direction(DioPin, Direction),
    Value(DioPin, Level),
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Latch {
    pub rs: Level,
    pub nibble: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transaction {
    Command(u8),
    Data(u8),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

fn port_index(port: Port) -> usize {
    match port {
        Port::A => 0,
        Port::B => 1,
        Port::C => 2,
        Port::D => 3,
    }
}

pub struct SimDio {
    log: Log,
    levels: [[Level; 8]; 4],
    directions: [[Direction; 8]; 4],
}

impl SimDio {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            levels: [[Level::Low; 8]; 4],
            directions: [[Direction::Input; 8]; 4],
        }
    }

    pub fn direction(&self, port: Port, pin: u8) -> Direction {
        self.directions[port_index(port)][pin as usize]
    }
}

impl Dio for SimDio {
    type Error = Infallible;

    fn set_pin_direction(
        &mut self,
        port: Port,
        pin: u8,
        direction: Direction,
    ) -> Result<(), Self::Error> {
        if pin < 8 {
            self.directions[port_index(port)][pin as usize] = direction;
            self.log
                .borrow_mut()
                .push(Event::Direction(DioPin::new(port, pin), direction));
        }
        Ok(())
    }

    fn set_pin_value(&mut self, port: Port, pin: u8, level: Level) -> Result<(), Self::Error> {
        if pin < 8 {
            self.levels[port_index(port)][pin as usize] = level;
            self.log
                .borrow_mut()
                .push(Event::Value(DioPin::new(port, pin), level));
        }
        Ok(())
    }

    fn get_pin_value(&mut self, port: Port, pin: u8) -> Result<Level, Self::Error> {
        Ok(self
            .levels
            .get(port_index(port))
            .and_then(|p| p.get(pin as usize))
            .copied()
            .unwrap_or(Level::Low))
    }
}

pub struct SimDelay {
    log: Log,
}

impl SimDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

/// Fresh log with a backend and delay writing into it.
pub fn bench() -> (Log, SimDio, SimDelay) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let dio = SimDio::new(log.clone());
    let delay = SimDelay::new(log.clone());
    (log, dio, delay)
}

/// Nibbles latched on every falling edge of E, with the RS level at that moment.
pub fn latches(events: &[Event], pins: &LcdPins) -> Vec<Latch> {
    let mut levels = std::collections::HashMap::new();
    let mut out = Vec::new();
    for event in events {
        if let Event::Value(pin, level) = *event {
            let previous = levels.insert(pin, level).unwrap_or(Level::Low);
            if pin == pins.e && previous == Level::High && level == Level::Low {
                let get = |p: &DioPin| *levels.get(p).unwrap_or(&Level::Low);
                let nibble = pins
                    .data()
                    .iter()
                    .enumerate()
                    .map(|(bit, p)| if get(p) == Level::High { 1u8 << bit } else { 0 })
                    .sum::<u8>();
                out.push(Latch {
                    rs: get(&pins.rs),
                    nibble,
                });
            }
        }
    }
    out
}

/// Pairs latches high nibble first. Panics if a pair changes RS halfway.
pub fn transactions(latches: &[Latch]) -> Vec<Transaction> {
    assert_eq!(latches.len() % 2, 0, "odd number of nibbles: {:?}", latches);
    latches
        .chunks(2)
        .map(|pair| {
            assert_eq!(pair[0].rs, pair[1].rs, "RS changed mid transaction");
            let byte = (pair[0].nibble << 4) | pair[1].nibble;
            match pair[0].rs {
                Level::Low => Transaction::Command(byte),
                Level::High => Transaction::Data(byte),
            }
        })
        .collect()
}

/// Decode the whole log as paired transactions.
pub fn decode(log: &Log, pins: &LcdPins) -> Vec<Transaction> {
    transactions(&latches(&log.borrow(), pins))
}

/// Characters sent as data, in order.
pub fn text(log: &Log, pins: &LcdPins) -> Vec<u8> {
    decode(log, pins)
        .into_iter()
        .filter_map(|t| match t {
            Transaction::Data(c) => Some(c),
            Transaction::Command(_) => None,
        })
        .collect()
}
