//! Keypad panel firmware for the Teensy 2.0.
//!
//! Two images share this crate:
//! - `bigred`: passcode, safety switch and arm switch gate a big red button
//! - `meetingcalc`: headcount × hourly rate × elapsed time on a 7-segment display
//!
//! Drivers and application loops are generic over `embedded-hal` traits
//! and run on the host under test. The `atmega32u4` feature adds the
//! register-level bindings in [`hal`] and builds the two binaries.

#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod drivers;
pub mod error;
pub mod os;

#[cfg(feature = "atmega32u4")]
pub mod hal;

pub use error::Error;
