use crate::config::{KEY_HOLD_LIMIT_MS, KEY_POLL_MS, KEY_SETTLE_MS};
use crate::drivers::keypad::{Key, Scan};
use crate::error::Error;
use embedded_hal::blocking::delay::DelayMs;

/// Source of debounced key events for the application loops.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Option<Key>, Error>;
}

/// Timing of the repeat suppression in [`KeyReader`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DebounceTiming {
    /// Wait after the first scan. Always charged to the hold budget.
    pub settle_ms: u16,
    pub poll_ms: u16,
    pub hold_limit_ms: u16,
    /// When false the settle time is only charged, not waited.
    pub settle: bool,
}

impl DebounceTiming {
    pub const STANDARD: Self = Self {
        settle_ms: KEY_SETTLE_MS,
        poll_ms: KEY_POLL_MS,
        hold_limit_ms: KEY_HOLD_LIMIT_MS,
        settle: true,
    };

    /// Skips the settle wait so a multiplexed display blanks for less time.
    pub const NO_SETTLE: Self = Self {
        settle: false,
        ..Self::STANDARD
    };
}

impl Default for DebounceTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Reports a held key once per press.
///
/// After the first scan hits, the reader blocks while the same key stays
/// down, up to `hold_limit_ms`. The key from the first scan is returned
/// however the wait ends, so a key still held past the limit produces
/// another event on the next call.
pub struct KeyReader<S, D> {
    scanner: S,
    delay: D,
    timing: DebounceTiming,
}

impl<S, D> KeyReader<S, D>
where
    S: Scan,
    D: DelayMs<u16>,
{
    pub fn new(scanner: S, delay: D) -> Self {
        Self::with_timing(scanner, delay, DebounceTiming::STANDARD)
    }

    pub fn with_timing(scanner: S, delay: D, timing: DebounceTiming) -> Self {
        Self {
            scanner,
            delay,
            timing,
        }
    }

    pub fn release(self) -> (S, D) {
        (self.scanner, self.delay)
    }
}

impl<S, D> KeySource for KeyReader<S, D>
where
    S: Scan,
    D: DelayMs<u16>,
{
    fn read_key(&mut self) -> Result<Option<Key>, Error> {
        let key = match self.scanner.scan()? {
            Some(key) => key,
            None => return Ok(None),
        };

        if self.timing.settle {
            self.delay.delay_ms(self.timing.settle_ms);
        }

        let mut held_ms = self.timing.settle_ms;
        while held_ms < self.timing.hold_limit_ms && self.scanner.scan()? == Some(key) {
            self.delay.delay_ms(self.timing.poll_ms);
            held_ms = held_ms.saturating_add(self.timing.poll_ms);
        }

        Ok(Some(key))
    }
}
