#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use avr_device::atmega32u4::Peripherals;
use keypad_firmware::application::MeetingCalc;
use keypad_firmware::drivers::{DebounceTiming, KeyReader, SerialConsole, SevenSegment};
use keypad_firmware::hal::{self, board, Delay, Discard, OverflowTimer, Prescaler, SinkSegments};
use keypad_firmware::os::TICKS;
use panic_halt as _;

#[avr_device::interrupt(atmega32u4)]
fn TIMER1_OVF() {
    TICKS.tick();
}

#[avr_device::entry]
fn main() -> ! {
    let dp = Peripherals::take().unwrap();
    hal::disable_clock_prescaler(&dp.CPU);

    let mut timer = OverflowTimer::new(dp.TC1);
    timer.start(Prescaler::Div64);
    unsafe { avr_device::interrupt::enable() };

    // PD2/PD3 drive digits, so USART1 is unavailable here
    let console = SerialConsole::new(Discard);
    let keys = KeyReader::with_timing(board::keypad(), Delay, DebounceTiming::NO_SETTLE);
    let display = SevenSegment::new(SinkSegments::new(), board::digit_enables(), Delay);
    let mut calc = MeetingCalc::new(keys, display, console, &TICKS);

    loop {
        if let Err(error) = calc.run() {
            calc.console_mut().report(&error).ok();
        }
    }
}
