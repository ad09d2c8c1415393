use crate::drivers::keypad::Key;
use crate::error::Error;
use embedded_hal::serial::Write;

/// One-way debug channel to a host terminal.
pub struct SerialConsole<W> {
    serial: W,
}

impl<W: Write<u8>> SerialConsole<W> {
    pub fn new(serial: W) -> Self {
        Self { serial }
    }

    pub fn release(self) -> W {
        self.serial
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        nb::block!(self.serial.write(byte)).map_err(|_| Error::Serial)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), Error> {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    /// Echo a key press as its character
    pub fn echo(&mut self, key: Key) -> Result<(), Error> {
        self.write_byte(key.as_byte())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        nb::block!(self.serial.flush()).map_err(|_| Error::Serial)
    }

    /// Describe a fault on the console.
    pub fn report(&mut self, error: &Error) -> Result<(), Error> {
        match *error {
            Error::Gpio => self.write_str("GPIO fault\n"),
            Error::Serial => self.write_str("Serial fault\n"),
            Error::IllegalGlyph(code) => ufmt::uwriteln!(self, "Illegal Access:{}", code),
        }
    }
}

impl<W: Write<u8>> ufmt::uWrite for SerialConsole<W> {
    type Error = Error;

    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        SerialConsole::write_str(self, s)
    }
}
