//! Hardware Resource Management
//!
//! Assigns the indicator LED pins. Every LED drives one GPIO output; wire
//! polarity is set in `main.rs`.

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// Indicator LED pins
    leds: LedResources {
        num_lock_pin: PIN_6,
        caps_lock_pin: PIN_7,
        link_pin: PIN_8,
    },
}
