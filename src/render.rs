//! Render function
//!
//! Computes what every LED should show from [`IndicatorState`] and pushes it
//! through the [`LedDriver`]. Computing is pure; rendering the same state
//! twice writes the same values twice.
//!
//! # Precedence
//! 1. Idle, link not blinking: everything OFF.
//! 2. Idle, link blinking: lock LEDs OFF, link LED follows the blink phase.
//!    With [`IdlePolicy::AllOff`] this case is also everything OFF.
//! 3. Active: lock LEDs mirror the host; link LED follows the blink phase
//!    while blinking, otherwise shows the connection.

use crate::config::IdlePolicy;
use crate::led::{Led, LedDriver};
use crate::system::state::IndicatorState;

/// Desired output of every LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub num_lock: bool,
    pub caps_lock: bool,
    pub link: bool,
}

impl Frame {
    pub const OFF: Frame = Frame {
        num_lock: false,
        caps_lock: false,
        link: false,
    };

    pub fn get(&self, led: Led) -> bool {
        match led {
            Led::NumLock => self.num_lock,
            Led::CapsLock => self.caps_lock,
            Led::Link => self.link,
        }
    }
}

/// Desired state of every LED.
pub fn frame(state: &IndicatorState, policy: IdlePolicy) -> Frame {
    if state.device_idle {
        let keep_blink = policy == IdlePolicy::KeepPairingBlink && state.link_blinking();
        if !keep_blink {
            return Frame::OFF;
        }
        return Frame {
            num_lock: false,
            caps_lock: false,
            link: state.blink_phase,
        };
    }

    Frame {
        num_lock: state.numlock_on,
        caps_lock: state.capslock_on,
        link: link(state),
    }
}

/// Desired link LED state while active.
fn link(state: &IndicatorState) -> bool {
    if state.link_blinking() {
        state.blink_phase
    } else {
        state.link_connected
    }
}

/// Write one LED, logging a failure. Returns false if the write failed.
pub fn write<D: LedDriver>(driver: &mut D, led: Led, on: bool) -> bool {
    match driver.set(led, on) {
        Ok(()) => {
            trace!("{} LED {}", led, on);
            true
        }
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

/// Write every LED of `frame`. A failed write does not stop the others.
///
/// Returns the number of failed writes.
pub fn apply<D: LedDriver>(frame: &Frame, driver: &mut D) -> usize {
    Led::ALL
        .iter()
        .filter(|&&led| !write(driver, led, frame.get(led)))
        .count()
}

/// Compute and apply the full frame for `state`.
pub fn render<D: LedDriver>(
    state: &IndicatorState,
    policy: IdlePolicy,
    driver: &mut D,
) -> usize {
    apply(&frame(state, policy), driver)
}

/// Compute and apply the link LED only, for blink ticks.
pub fn render_link<D: LedDriver>(
    state: &IndicatorState,
    policy: IdlePolicy,
    driver: &mut D,
) -> bool {
    write(driver, Led::Link, frame(state, policy).link)
}
