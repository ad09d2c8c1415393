use crate::config::{CPU_FREQ_HZ, DEBUG_BAUD};
use avr_device::atmega32u4::USART1;
use core::convert::Infallible;
use embedded_hal::serial::Write;

// Baud rate calculation, normal speed mode
const UBRR: u16 = (CPU_FREQ_HZ / (16 * DEBUG_BAUD) - 1) as u16;

const UDRE1: u8 = 1 << 5;
const TXC1: u8 = 1 << 6;
const TXEN1: u8 = 1 << 3;
// 8 data bits, no parity, 1 stop bit
const FRAME_8N1: u8 = 0b0000_0110;

/// Transmit-only USART1 (TX on PD3).
pub struct Uart {
    usart: USART1,
}

impl Uart {
    pub fn new(usart: USART1) -> Self {
        usart.ubrr1.write(|w| unsafe { w.bits(UBRR) });
        usart.ucsr1c.write(|w| unsafe { w.bits(FRAME_8N1) });
        usart.ucsr1b.write(|w| unsafe { w.bits(TXEN1) });
        Self { usart }
    }
}

impl Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if self.usart.ucsr1a.read().bits() & UDRE1 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.usart.udr1.write(|w| unsafe { w.bits(byte) });
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.usart.ucsr1a.read().bits() & TXC1 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        Ok(())
    }
}

/// Debug channel for boards whose USART pins are taken by other wiring.
#[derive(Default)]
pub struct Discard;

impl Write<u8> for Discard {
    type Error = Infallible;

    fn write(&mut self, _byte: u8) -> nb::Result<(), Infallible> {
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        Ok(())
    }
}
