#![no_std]
#![no_main]

use avr_device::atmega32u4::Peripherals;
use keypad_firmware::application::{AccessPanel, Switches};
use keypad_firmware::drivers::{KeyReader, SerialConsole};
use keypad_firmware::hal::{self, board, Delay, Uart};
use panic_halt as _;

#[avr_device::entry]
fn main() -> ! {
    let dp = Peripherals::take().unwrap();
    hal::disable_clock_prescaler(&dp.CPU);

    let mut console = SerialConsole::new(Uart::new(dp.USART1));
    console.write_line("bigred ready").ok();

    let (safety, arm) = board::switches();
    let keys = KeyReader::new(board::keypad(), Delay);
    let mut panel = AccessPanel::new(
        keys,
        Switches { safety, arm },
        board::status_leds(),
        Delay,
        console,
    );

    loop {
        if let Err(error) = panel.step() {
            panel.console_mut().report(&error).ok();
        }
    }
}
