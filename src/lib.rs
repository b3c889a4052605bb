//! Model K indicator LEDs
//!
//! Drives the Num Lock, Caps Lock and wireless link LEDs from three
//! independent inputs: host HID lock-key indicators, wireless link status,
//! and device activity. The link LED blinks while a profile is open for
//! pairing.
//!
//! Hardware-free and `no_std`; the firmware binary supplies the pins, the
//! executor and the time driver.

#![cfg_attr(not(test), no_std)]

// Must stay first: the logging macros are textually scoped.
#[macro_use]
mod fmt;

pub mod blink;
pub mod config;
pub mod controller;
pub mod error;
pub mod led;
pub mod reducer;
pub mod render;
pub mod source;
pub mod system;

pub use config::{Config, IdlePolicy};
pub use controller::{run_blink, run_events, IndicatorController};
pub use error::DriverError;
pub use led::{Led, LedDriver, LedPins, Polarity};
