//! Configuration constants for the keypad firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// Debug console baud rate
pub const DEBUG_BAUD: u32 = 9600;

/// Wait after the first scan of a key before polling for release
pub const KEY_SETTLE_MS: u16 = 50;

/// Interval between release polls of a held key
pub const KEY_POLL_MS: u16 = 10;

/// Budget after which a held key is reported regardless
pub const KEY_HOLD_LIMIT_MS: u16 = 1000;

/// Length of one blink step for lockout and acknowledgment sequences
pub const BLINK_STEP_MS: u16 = 50;

/// LEDs toggle on every n-th blink step
pub const BLINK_TOGGLE_EVERY: u16 = 5;

/// Lockout keeps running while the step counter is at or below this
pub const LOCKOUT_MIN_STEPS: u16 = 60;

/// Acknowledgment blink runs steps `0..=ACK_STEPS`
pub const ACK_STEPS: u16 = 10;

/// Slots in the passcode buffer
pub const PASSCODE_SLOTS: usize = 10;

/// Code that unlocks the access panel
pub const PASSCODE: &[u8] = b"1234";

/// Digit enable hold time per multiplexed digit
pub const DIGIT_ON_MS: u16 = 1;

/// Timer1 overflows per second (16 MHz / 64 / 65536 ~= 3.8, rounded)
pub const TICKS_PER_SECOND: f32 = 4.0;
