pub mod key_reader;
pub mod keypad;
pub mod serial_console;
pub mod seven_segment;
pub mod status_leds;

pub use key_reader::{DebounceTiming, KeyReader, KeySource};
pub use keypad::{Key, Keypad, Scan};
pub use serial_console::SerialConsole;
pub use seven_segment::{Marker, SegmentBus, SevenSegment};
pub use status_leds::{BicolorLed, Color, StageLed, StatusLeds};
