#![allow(dead_code)]

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::serial;
use keypad_firmware::drivers::{Key, KeySource, SegmentBus};
use keypad_firmware::Error;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

/// A wire whose level is shared between clones: the test holds one end,
/// the firmware the other.
#[derive(Clone, Default)]
pub struct Line {
    level: Rc<Cell<bool>>,
    edges: Option<Edges>,
}

/// Level changes driven by the firmware, stamped with the clock time.
#[derive(Clone)]
struct Edges {
    now: Rc<Cell<u32>>,
    log: Rc<RefCell<Vec<(u32, bool)>>>,
}

impl Line {
    pub fn set(&self, high: bool) {
        self.level.set(high);
    }

    pub fn is_set(&self) -> bool {
        self.level.get()
    }

    /// `(time, level)` for every change the firmware drove on a line
    /// made with [`Clock::traced_line`].
    pub fn edges(&self) -> Vec<(u32, bool)> {
        self.edges
            .as_ref()
            .map(|edges| edges.log.borrow().clone())
            .unwrap_or_default()
    }

    fn drive(&self, high: bool) {
        if let Some(edges) = &self.edges {
            if self.level.get() != high {
                edges.log.borrow_mut().push((edges.now.get(), high));
            }
        }
        self.level.set(high);
    }
}

impl InputPin for Line {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}

impl OutputPin for Line {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }
}

/// Simulated time. Delays advance it and fire scheduled line changes.
#[derive(Clone, Default)]
pub struct Clock {
    now: Rc<Cell<u32>>,
    events: Rc<RefCell<Vec<(u32, Line, bool)>>>,
}

impl Clock {
    pub fn now(&self) -> u32 {
        self.now.get()
    }

    /// A low line that records its edges against this clock.
    pub fn traced_line(&self) -> Line {
        Line {
            level: Rc::default(),
            edges: Some(Edges {
                now: self.now.clone(),
                log: Rc::default(),
            }),
        }
    }

    /// Set `line` to `high` once `after_ms` more milliseconds have passed.
    pub fn schedule(&self, after_ms: u32, line: &Line, high: bool) {
        let at = self.now() + after_ms;
        self.events.borrow_mut().push((at, line.clone(), high));
    }
}

impl DelayMs<u16> for Clock {
    fn delay_ms(&mut self, ms: u16) {
        let now = self.now.get() + u32::from(ms);
        self.now.set(now);
        self.events.borrow_mut().retain(|(at, line, high)| {
            if *at <= now {
                line.set(*high);
                false
            } else {
                true
            }
        });
    }
}

/// Key source fed from text: digits, `*`, `#`; `.` is a read with
/// nothing pressed. Reads nothing once the script runs out.
#[derive(Clone, Default)]
pub struct Typist(Rc<RefCell<VecDeque<Option<Key>>>>);

impl Typist {
    pub fn type_in(&self, text: &str) {
        let mut queue = self.0.borrow_mut();
        for c in text.chars() {
            let key = match c {
                '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
                '*' => Some(Key::Star),
                '#' => Some(Key::Hash),
                '.' => None,
                other => panic!("no key for {other:?}"),
            };
            queue.push_back(key);
        }
    }

    pub fn remaining(&self) -> usize {
        self.0.borrow().len()
    }
}

impl KeySource for Typist {
    fn read_key(&mut self) -> Result<Option<Key>, Error> {
        Ok(self.0.borrow_mut().pop_front().flatten())
    }
}

/// Collects everything written to the debug channel.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl serial::Write<u8> for Capture {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        self.0.borrow_mut().push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        Ok(())
    }
}

/// Records every pattern written to the segment lines.
#[derive(Clone, Default)]
pub struct SegmentLog(Rc<RefCell<Vec<u8>>>);

impl SegmentLog {
    /// Patterns of the last full frame, without the blanking writes.
    pub fn last_frame(&self) -> Vec<u8> {
        let log = self.0.borrow();
        let loaded: Vec<u8> = log.iter().step_by(2).copied().collect();
        loaded[loaded.len() - 5..].to_vec()
    }

    pub fn last_write(&self) -> Option<u8> {
        self.0.borrow().last().copied()
    }

    pub fn frames(&self) -> usize {
        self.0.borrow().len() / 10
    }

    pub fn forget(&self) {
        self.0.borrow_mut().clear();
    }
}

impl SegmentBus for SegmentLog {
    fn write_segments(&mut self, pattern: u8) -> Result<(), Error> {
        self.0.borrow_mut().push(pattern);
        Ok(())
    }
}
