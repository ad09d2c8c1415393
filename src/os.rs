//! System time tracking shared between the timer interrupt and the main loop

use core::cell::Cell;
use critical_section::Mutex;

/// Free-running tick counter.
///
/// Incremented from the Timer1 overflow interrupt and read from the main
/// loop. Both sides go through a critical section so a multi-byte read is
/// never torn by an interrupt.
pub struct TickCounter {
    count: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    /// Increment system tick counter
    #[inline]
    pub fn tick(&self) {
        self.advance(1);
    }

    /// Add `ticks` at once
    pub fn advance(&self, ticks: u32) {
        critical_section::with(|cs| {
            let count = self.count.borrow(cs);
            count.set(count.get().wrapping_add(ticks));
        });
    }

    /// Get current system tick count
    #[inline]
    pub fn get(&self) -> u32 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything the application can read elapsed ticks from.
pub trait TickSource {
    fn ticks(&self) -> u32;
}

impl TickSource for TickCounter {
    fn ticks(&self) -> u32 {
        self.get()
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn ticks(&self) -> u32 {
        (**self).ticks()
    }
}

/// Global tick counter fed by the Timer1 overflow interrupt
pub static TICKS: TickCounter = TickCounter::new();
