//! Errors reported by the LED output driver.
//!
//! Only [`DriverError::Configure`] is fatal, and only during setup. A
//! [`DriverError::Write`] after setup is logged by the render pass and dropped;
//! the next render writes the pin again.

use core::fmt;

use embedded_hal::digital::ErrorKind;

use crate::led::Led;

/// Error from an LED pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The pin could not be configured as an output or driven to its initial
    /// OFF level.
    Configure { led: Led, kind: ErrorKind },
    /// A pin write failed after setup.
    Write { led: Led, kind: ErrorKind },
}

impl DriverError {
    /// The LED the failing pin belongs to.
    pub fn led(&self) -> Led {
        match *self {
            DriverError::Configure { led, .. } | DriverError::Write { led, .. } => led,
        }
    }

    /// The error kind reported by the pin.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            DriverError::Configure { kind, .. } | DriverError::Write { kind, .. } => kind,
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Configure { led, kind } => {
                write!(f, "error configuring {led} LED GPIO: {kind:?}")
            }
            DriverError::Write { led, kind } => {
                write!(f, "error setting {led} LED GPIO: {kind:?}")
            }
        }
    }
}

impl core::error::Error for DriverError {}
