//! LED Output Driver
//!
//! Abstracts "set logical LED X to on/off" over the three indicator GPIO
//! lines. The controller only ever talks to a [`LedDriver`]; on the board the
//! driver is a [`LedPins`] wrapping three `embedded_hal` output pins.
//!
//! # Failure model
//! - [`LedDriver::init`] configures every line and drives it OFF. The first
//!   failure aborts setup and names the LED.
//! - [`LedDriver::set`] performs exactly one pin write. A failure is returned
//!   to the render pass, which logs it and moves on to the next LED.

use core::fmt;

use embedded_hal::digital::{Error as _, OutputPin, PinState};

use crate::error::DriverError;

/// The three indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    NumLock,
    CapsLock,
    /// Wireless link status LED.
    Link,
}

impl Led {
    /// All LEDs, in the order they are initialized and rendered.
    pub const ALL: [Led; 3] = [Led::NumLock, Led::CapsLock, Led::Link];

    pub fn name(&self) -> &'static str {
        match self {
            Led::NumLock => "NumLock",
            Led::CapsLock => "CapsLock",
            Led::Link => "Link",
        }
    }
}

impl fmt::Display for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Electrical level that lights an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pin high lights the LED.
    #[default]
    ActiveHigh,
    /// Pin low lights the LED (LED wired to the supply rail).
    ActiveLow,
}

impl Polarity {
    /// Pin level for a logical LED state.
    pub fn level(&self, on: bool) -> PinState {
        match self {
            Polarity::ActiveHigh => PinState::from(on),
            Polarity::ActiveLow => PinState::from(!on),
        }
    }
}

/// Sets logical LEDs on or off.
pub trait LedDriver {
    /// Configure every LED line as an output and drive it OFF.
    fn init(&mut self) -> Result<(), DriverError>;

    /// Drive one LED. Exactly one pin write.
    fn set(&mut self, led: Led, on: bool) -> Result<(), DriverError>;
}

/// Three GPIO lines, one per indicator LED.
pub struct LedPins<P> {
    num_lock: P,
    caps_lock: P,
    link: P,
    polarity: Polarity,
}

impl<P: OutputPin> LedPins<P> {
    pub fn new(num_lock: P, caps_lock: P, link: P, polarity: Polarity) -> Self {
        Self {
            num_lock,
            caps_lock,
            link,
            polarity,
        }
    }

    fn pin(&mut self, led: Led) -> &mut P {
        match led {
            Led::NumLock => &mut self.num_lock,
            Led::CapsLock => &mut self.caps_lock,
            Led::Link => &mut self.link,
        }
    }
}

impl<P: OutputPin> LedDriver for LedPins<P> {
    fn init(&mut self) -> Result<(), DriverError> {
        let off = self.polarity.level(false);
        for led in Led::ALL {
            self.pin(led)
                .set_state(off)
                .map_err(|e| DriverError::Configure {
                    led,
                    kind: e.kind(),
                })?;
        }
        Ok(())
    }

    fn set(&mut self, led: Led, on: bool) -> Result<(), DriverError> {
        let level = self.polarity.level(on);
        self.pin(led)
            .set_state(level)
            .map_err(|e| DriverError::Write {
                led,
                kind: e.kind(),
            })
    }
}
