//! Five digit multiplexed 7-segment display.
//!
//! All digits share one set of segment lines. Each digit position has its
//! own enable, so a frame is drawn by loading one digit's pattern, pulsing
//! its enable for a millisecond and moving on. The caller has to redraw
//! continuously for the whole number to appear lit.

use crate::config::DIGIT_ON_MS;
use crate::error::Error;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

/// Number of digit positions.
pub const DIGITS: usize = 5;

/// Decimal point segment bit.
pub const DECIMAL_POINT: u8 = 0b1000_0000;

pub const GLYPH_H: u8 = 16;
pub const GLYPH_P: u8 = 17;

/// Segment patterns: hex digits 0-F, then `H.` and `P.`.
pub const GLYPHS: [u8; 18] = [
    0b0111_1110, // 0
    0b0100_1000, // 1
    0b0011_1101, // 2
    0b0110_1101, // 3
    0b0100_1011, // 4
    0b0110_0111, // 5
    0b0111_0111, // 6
    0b0100_1100, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0101_1111, // A
    0b0111_0011, // b
    0b0011_0001, // c
    0b0111_1001, // d
    0b0011_0111, // E
    0b0001_0111, // F
    0b1101_1011, // H.
    0b1001_1111, // P.
];

/// Shared segment lines, written as one byte (bit set = segment lit).
pub trait SegmentBus {
    fn write_segments(&mut self, pattern: u8) -> Result<(), Error>;
}

/// Glyph shown in the leftmost position while a value is being entered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    Hourly,
    People,
}

impl Marker {
    pub fn glyph(self) -> u8 {
        match self {
            Marker::Hourly => GLYPH_H,
            Marker::People => GLYPH_P,
        }
    }
}

/// The `n`-th decimal digit of `x`, counting from the right.
pub fn nth_digit(x: u32, n: u32) -> u8 {
    let shifted = (0..n).fold(x, |x, _| x / 10);
    (shifted % 10) as u8
}

pub struct SevenSegment<B, D, DL> {
    bus: B,
    digits: [D; DIGITS],
    delay: DL,
}

impl<B, D, DL> SevenSegment<B, D, DL>
where
    B: SegmentBus,
    D: OutputPin,
    DL: DelayMs<u16>,
{
    /// `digits[0]` is the leftmost (most significant) position.
    pub fn new(bus: B, digits: [D; DIGITS], delay: DL) -> Self {
        Self { bus, digits, delay }
    }

    pub fn release(self) -> (B, [D; DIGITS], DL) {
        (self.bus, self.digits, self.delay)
    }

    /// Blank all segments
    pub fn clear(&mut self) -> Result<(), Error> {
        self.bus.write_segments(0)
    }

    /// Load a glyph onto the segment lines.
    ///
    /// Codes outside [`GLYPHS`] blank the display instead and are returned
    /// as [`Error::IllegalGlyph`].
    pub fn show_glyph(&mut self, code: u8) -> Result<(), Error> {
        self.show(code, false)
    }

    /// Draw one frame of `num`, optionally replacing the leftmost digit
    /// with a marker glyph.
    pub fn display_multi(&mut self, num: u32, marker: Option<Marker>) -> Result<(), Error> {
        for position in 0..DIGITS {
            let code = match marker {
                Some(marker) if position == 0 => marker.glyph(),
                _ => nth_digit(num, (DIGITS - 1 - position) as u32),
            };
            self.show(code, false)?;
            self.pulse(position)?;
        }
        Ok(())
    }

    /// Draw one frame of `value` with two decimals (`xxx.xx`).
    ///
    /// Values that do not fit are truncated to an integer and shown
    /// without the decimal point.
    pub fn display_multi_f(&mut self, value: f32) -> Result<(), Error> {
        let (num, decimal) = fixed_point(value);
        for position in 0..DIGITS {
            let code = nth_digit(num, (DIGITS - 1 - position) as u32);
            self.show(code, decimal && position == 2)?;
            self.pulse(position)?;
        }
        Ok(())
    }

    fn show(&mut self, code: u8, decimal_point: bool) -> Result<(), Error> {
        let Some(&pattern) = GLYPHS.get(code as usize) else {
            self.clear()?;
            return Err(Error::IllegalGlyph(code));
        };
        let pattern = if decimal_point {
            pattern | DECIMAL_POINT
        } else {
            pattern
        };
        self.bus.write_segments(pattern)
    }

    fn pulse(&mut self, position: usize) -> Result<(), Error> {
        self.digits[position].set_high().map_err(|_| Error::Gpio)?;
        self.delay.delay_ms(DIGIT_ON_MS);
        self.digits[position].set_low().map_err(|_| Error::Gpio)?;
        self.clear()
    }
}

/// Scale to hundredths with rounding; `(digits, decimal point shown)`.
fn fixed_point(value: f32) -> (u32, bool) {
    let hundredths = (value * 100.0 + 0.5) as u32;
    if hundredths >= 100_000 {
        (hundredths / 100, false)
    } else {
        (hundredths, true)
    }
}
