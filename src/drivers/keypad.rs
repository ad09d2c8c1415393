//! 4x3 matrix keypad scanning.
//!
//! Each column is an open-drain output: driving it low connects its keys
//! to ground, releasing it (high) leaves the line floating on its pull-up.
//! Rows are pull-up inputs, so a pressed key on the driven column reads low.

use crate::error::Error;
use embedded_hal::digital::v2::{InputPin, OutputPin};

/// Number of rows in the matrix.
pub const ROWS: usize = 4;
/// Number of columns in the matrix.
pub const COLS: usize = 3;

/// One key of the keypad.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Star,
    Hash,
}

impl Key {
    /// ASCII character printed on the key
    pub fn as_byte(self) -> u8 {
        match self {
            Key::Digit(d) => b'0' + d,
            Key::Star => b'*',
            Key::Hash => b'#',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Key at `[row][col]`.
pub const LAYOUT: [[Key; COLS]; ROWS] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3)],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6)],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9)],
    [Key::Star, Key::Digit(0), Key::Hash],
];

/// Something that can report the key currently held down.
pub trait Scan {
    fn scan(&mut self) -> Result<Option<Key>, Error>;
}

pub struct Keypad<C, R> {
    columns: [C; COLS],
    rows: [R; ROWS],
}

impl<C, R> Keypad<C, R>
where
    C: OutputPin,
    R: InputPin,
{
    /// Columns must already be released (high) and rows pulled up.
    pub fn new(columns: [C; COLS], rows: [R; ROWS]) -> Self {
        Self { columns, rows }
    }

    /// Give up ownership of the column and row pins.
    pub fn release(self) -> ([C; COLS], [R; ROWS]) {
        (self.columns, self.rows)
    }

    fn row_pressed(&self, row: usize) -> Result<bool, Error> {
        self.rows[row].is_low().map_err(|_| Error::Gpio)
    }
}

impl<C, R> Scan for Keypad<C, R>
where
    C: OutputPin,
    R: InputPin,
{
    /// Report the first pressed key found, columns first.
    ///
    /// Simultaneous presses are not disambiguated.
    fn scan(&mut self) -> Result<Option<Key>, Error> {
        for col in 0..COLS {
            self.columns[col].set_low().map_err(|_| Error::Gpio)?;

            for row in 0..ROWS {
                if self.row_pressed(row)? {
                    self.columns[col].set_high().map_err(|_| Error::Gpio)?;
                    return Ok(Some(LAYOUT[row][col]));
                }
            }

            self.columns[col].set_high().map_err(|_| Error::Gpio)?;
        }

        Ok(None)
    }
}
