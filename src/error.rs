//! Error type shared by drivers and application loops

/// Faults surfaced by the firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A pin read or write failed
    Gpio,
    /// The debug channel rejected a byte
    Serial,
    /// Display code outside the glyph table
    IllegalGlyph(u8),
}
