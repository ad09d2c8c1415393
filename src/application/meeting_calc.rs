//! Meeting cost meter.
//!
//! Asks for the headcount and the hourly rate on the keypad, then shows
//! the running cost of the meeting on the 7-segment display.

use crate::config::TICKS_PER_SECOND;
use crate::drivers::{Key, KeySource, Marker, SegmentBus, SerialConsole, SevenSegment};
use crate::error::Error;
use crate::os::TickSource;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial::Write;
use heapless::Vec;

/// Digits accepted for the headcount.
pub const PEOPLE_DIGITS: usize = 4;
/// Digits accepted for the hourly rate.
pub const HOURLY_DIGITS: usize = 5;

/// Leading decimal digits of `text` as a number; 0 when there are none.
pub fn parse_decimal(text: &[u8]) -> u32 {
    text.iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

/// Cost so far of `people` paid `hourly` each, after `ticks` timer ticks.
pub fn meeting_cost(people: u32, hourly: u32, ticks: u32) -> f32 {
    people as f32 * hourly as f32 * ticks as f32 / 60.0 / 60.0 / TICKS_PER_SECOND
}

/// What a key did to an [`EntryBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Editing,
    Done(u32),
}

/// Bounded digit buffer for one numeric prompt.
#[derive(Default)]
pub struct EntryBuffer<const N: usize> {
    digits: Vec<u8, N>,
}

impl<const N: usize> EntryBuffer<N> {
    pub fn new() -> Self {
        Self { digits: Vec::new() }
    }

    pub fn value(&self) -> u32 {
        parse_decimal(&self.digits)
    }

    /// `*` clears, `#` finishes, a digit is stored and finishes once the
    /// buffer is full.
    pub fn apply(&mut self, key: Key) -> Entry {
        match key {
            Key::Star => {
                self.digits.clear();
                Entry::Editing
            }
            Key::Hash => Entry::Done(self.value()),
            Key::Digit(_) => {
                // never full here: a full buffer has already finished
                self.digits.push(key.as_byte()).ok();
                if self.digits.is_full() {
                    Entry::Done(self.value())
                } else {
                    Entry::Editing
                }
            }
        }
    }
}

/// Headcount and hourly rate, billed against the free-running tick count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Meter {
    pub people: u32,
    pub hourly: u32,
}

impl Meter {
    pub fn cost(&self, ticks: u32) -> f32 {
        meeting_cost(self.people, self.hourly, ticks)
    }
}

pub struct MeetingCalc<K, B, D, DL, W, T> {
    keys: K,
    display: SevenSegment<B, D, DL>,
    console: SerialConsole<W>,
    ticks: T,
}

impl<K, B, D, DL, W, T> MeetingCalc<K, B, D, DL, W, T>
where
    K: KeySource,
    B: SegmentBus,
    D: OutputPin,
    DL: DelayMs<u16>,
    W: Write<u8>,
    T: TickSource,
{
    pub fn new(
        keys: K,
        display: SevenSegment<B, D, DL>,
        console: SerialConsole<W>,
        ticks: T,
    ) -> Self {
        Self {
            keys,
            display,
            console,
            ticks,
        }
    }

    pub fn console_mut(&mut self) -> &mut SerialConsole<W> {
        &mut self.console
    }

    pub fn prompt_people(&mut self) -> Result<u32, Error> {
        self.prompt::<PEOPLE_DIGITS>(Marker::People)
    }

    pub fn prompt_hourly(&mut self) -> Result<u32, Error> {
        self.prompt::<HOURLY_DIGITS>(Marker::Hourly)
    }

    /// Meter for the entered values; the cost grows with the tick count.
    pub fn start_meter(&self, people: u32, hourly: u32) -> Meter {
        Meter { people, hourly }
    }

    /// Draw one frame of the running cost and return it.
    pub fn refresh(&mut self, meter: &Meter) -> Result<f32, Error> {
        let cost = meter.cost(self.ticks.ticks());
        self.display.display_multi_f(cost)?;
        Ok(cost)
    }

    /// Both prompts, then meter forever.
    pub fn run(&mut self) -> Result<core::convert::Infallible, Error> {
        let people = self.prompt_people()?;
        let hourly = self.prompt_hourly()?;
        let meter = self.start_meter(people, hourly);
        loop {
            self.refresh(&meter)?;
        }
    }

    fn prompt<const N: usize>(&mut self, marker: Marker) -> Result<u32, Error> {
        let mut entry = EntryBuffer::<N>::new();
        loop {
            self.display.display_multi(entry.value(), Some(marker))?;

            if let Some(key) = self.keys.read_key()? {
                self.console.echo(key).ok();
                if let Entry::Done(value) = entry.apply(key) {
                    return Ok(value);
                }
            }
        }
    }
}
