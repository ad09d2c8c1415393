//! Teensy 2.0 (ATmega32U4) bindings for the hardware-independent drivers

pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use gpio::board;
pub use gpio::{OpenDrain, Output, Pin, Port, PullUp, SinkSegments};
pub use timer::{Delay, OverflowTimer, Prescaler};
pub use uart::{Discard, Uart};

/// Run the CPU at the full 16 MHz crystal frequency.
pub fn disable_clock_prescaler(cpu: &avr_device::atmega32u4::CPU) {
    cpu.clkpr.write(|w| unsafe { w.bits(0x80) });
    cpu.clkpr.write(|w| unsafe { w.bits(0) });
}
