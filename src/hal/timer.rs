use crate::config::CPU_FREQ_HZ;
use avr_device::atmega32u4::TC1;
use embedded_hal::blocking::delay::DelayMs;

#[derive(Clone, Copy)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

/// Timer1 in normal mode, interrupting on every overflow.
///
/// With `Prescaler::Div64` at 16 MHz the 16-bit counter overflows about
/// 3.8 times a second, which the meeting meter treats as 4 Hz.
pub struct OverflowTimer {
    tc1: TC1,
}

impl OverflowTimer {
    pub fn new(tc1: TC1) -> Self {
        tc1.tccr1a.write(|w| unsafe { w.bits(0) });
        tc1.tcnt1.write(|w| unsafe { w.bits(0) });
        Self { tc1 }
    }

    pub fn start(&mut self, prescaler: Prescaler) {
        self.tc1.tccr1b.write(|w| unsafe { w.bits(prescaler as u8) });
        // Clear a stale overflow flag before enabling the interrupt
        self.tc1.tifr1.write(|w| unsafe { w.bits(1) });
        self.tc1.timsk1.write(|w| unsafe { w.bits(1) });
    }
}

/// Busy-wait delay calibrated for the CPU clock.
#[derive(Clone, Copy, Default)]
pub struct Delay;

impl Delay {
    // ~4 cycles per inner iteration
    const LOOPS_PER_MS: u16 = (CPU_FREQ_HZ / 1000 / 4) as u16;
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            for _ in 0..Self::LOOPS_PER_MS {
                avr_device::asm::nop();
            }
        }
    }
}
