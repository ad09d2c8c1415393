//! ATmega32U4 port pins behind the `embedded-hal` digital traits.
//!
//! Pins are identified at runtime by port and bit so that pins from
//! different ports can share one type (keypad columns, LED banks).

use avr_device::atmega32u4::{PORTB, PORTC, PORTD, PORTE, PORTF};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
/// Not yet configured
pub struct Floating;
/// Input with the internal pull-up enabled
pub struct PullUp;
/// Push-pull output
pub struct Output;
/// Driven low as an output, released as a pulled-up input when high
pub struct OpenDrain;
impl PinMode for Floating {}
impl PinMode for PullUp {}
impl PinMode for Output {}
impl PinMode for OpenDrain {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Port {
    B,
    C,
    D,
    E,
    F,
}

macro_rules! impl_port {
    ($($variant:ident => $PORT:ident, $pin:ident, $ddr:ident, $port:ident;)+) => {
        impl Port {
            fn modify_ddr(self, f: impl FnOnce(u8) -> u8) {
                // SAFETY: single-core read-modify-write from the main loop only
                unsafe {
                    match self {
                        $(Port::$variant => (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(f(r.bits()))),)+
                    }
                }
            }

            fn modify_port(self, f: impl FnOnce(u8) -> u8) {
                unsafe {
                    match self {
                        $(Port::$variant => (*$PORT::ptr()).$port.modify(|r, w| w.bits(f(r.bits()))),)+
                    }
                }
            }

            fn read_pin(self) -> u8 {
                unsafe {
                    match self {
                        $(Port::$variant => (*$PORT::ptr()).$pin.read().bits(),)+
                    }
                }
            }

            /// Write the whole DDR register
            pub(crate) fn write_ddr(self, bits: u8) {
                self.modify_ddr(|_| bits);
            }

            /// Write the whole PORT register
            pub(crate) fn write_port(self, bits: u8) {
                self.modify_port(|_| bits);
            }

            pub fn pin(self, bit: u8) -> Pin<Floating> {
                Pin {
                    port: self,
                    mask: 1 << bit,
                    _mode: PhantomData,
                }
            }
        }
    };
}

impl_port! {
    B => PORTB, pinb, ddrb, portb;
    C => PORTC, pinc, ddrc, portc;
    D => PORTD, pind, ddrd, portd;
    E => PORTE, pine, ddre, porte;
    F => PORTF, pinf, ddrf, portf;
}

#[derive(Debug)]
pub struct Pin<MODE> {
    port: Port,
    mask: u8,
    _mode: PhantomData<MODE>,
}

impl<MODE: PinMode> Pin<MODE> {
    fn into_mode<NEW: PinMode>(self) -> Pin<NEW> {
        Pin {
            port: self.port,
            mask: self.mask,
            _mode: PhantomData,
        }
    }

    pub fn into_output(self) -> Pin<Output> {
        let mask = self.mask;
        self.port.modify_port(|bits| bits & !mask);
        self.port.modify_ddr(|bits| bits | mask);
        self.into_mode()
    }

    pub fn into_pull_up_input(self) -> Pin<PullUp> {
        let mask = self.mask;
        self.port.modify_ddr(|bits| bits & !mask);
        self.port.modify_port(|bits| bits | mask);
        self.into_mode()
    }

    /// Starts released (input, pulled up).
    pub fn into_open_drain(self) -> Pin<OpenDrain> {
        self.into_pull_up_input().into_mode()
    }
}

impl Pin<PullUp> {
    fn level_high(&self) -> bool {
        self.port.read_pin() & self.mask != 0
    }
}

impl InputPin for Pin<PullUp> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.level_high())
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(!self.level_high())
    }
}

impl OutputPin for Pin<Output> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        self.port.modify_port(|bits| bits | mask);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        self.port.modify_port(|bits| bits & !mask);
        Ok(())
    }
}

impl OutputPin for Pin<OpenDrain> {
    type Error = Infallible;

    /// Release: input with pull-up
    fn set_high(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        self.port.modify_ddr(|bits| bits & !mask);
        self.port.modify_port(|bits| bits | mask);
        Ok(())
    }

    /// Sink: output low
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        self.port.modify_port(|bits| bits & !mask);
        self.port.modify_ddr(|bits| bits | mask);
        Ok(())
    }
}

/// Segment lines on PORTC, sunk by switching a bit to output while PORTC
/// stays low. A cleared DDR bit leaves the segment dark.
pub struct SinkSegments {
    _private: (),
}

impl SinkSegments {
    pub fn new() -> Self {
        Port::C.write_ddr(0);
        Port::C.write_port(0);
        Self { _private: () }
    }
}

impl crate::drivers::SegmentBus for SinkSegments {
    fn write_segments(&mut self, pattern: u8) -> Result<(), crate::error::Error> {
        Port::C.write_ddr(pattern);
        Ok(())
    }
}

// Teensy 2.0 wiring of both panels
pub mod board {
    use super::*;
    use crate::drivers::keypad::{Keypad, COLS, ROWS};
    use crate::drivers::seven_segment::DIGITS;
    use crate::drivers::{BicolorLed, StatusLeds};

    /// Keypad columns PF2, PF0, PF4 and rows PF1, PF6, PF5, PF3.
    pub fn keypad() -> Keypad<Pin<OpenDrain>, Pin<PullUp>> {
        let columns: [Pin<OpenDrain>; COLS] = [2, 0, 4].map(|bit| Port::F.pin(bit).into_open_drain());
        let rows: [Pin<PullUp>; ROWS] = [1, 6, 5, 3].map(|bit| Port::F.pin(bit).into_pull_up_input());
        Keypad::new(columns, rows)
    }

    /// Safety switch PC0, arm switch PC1
    pub fn switches() -> (Pin<PullUp>, Pin<PullUp>) {
        (
            Port::C.pin(0).into_pull_up_input(),
            Port::C.pin(1).into_pull_up_input(),
        )
    }

    /// LED1 PB0/PB1, LED2 PE7/PE6, LED3 PB2/PB3 (green/red)
    pub fn status_leds() -> StatusLeds<Pin<Output>> {
        let led = |port: Port, green: u8, red: u8| {
            BicolorLed::new(port.pin(green).into_output(), port.pin(red).into_output())
        };
        StatusLeds::new(led(Port::B, 0, 1), led(Port::E, 7, 6), led(Port::B, 2, 3))
    }

    /// Digit enables PD0-PD4, leftmost first
    pub fn digit_enables() -> [Pin<Output>; DIGITS] {
        [0, 1, 2, 3, 4].map(|bit| Port::D.pin(bit).into_output())
    }
}
