//! Activity signaling for idle control
//!
//! The key scanner calls [`signal_activity`] on every key event. The
//! inactivity tracker waits on it to decide when the keyboard goes idle and
//! when it wakes up again.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Signal for inactivity timer resets
static ACTIVITY_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signals user activity occurrence
pub fn signal_activity() {
    ACTIVITY_SIGNAL.signal(());
}

/// Waits for next activity signal
pub async fn wait() {
    ACTIVITY_SIGNAL.wait().await
}

/// Device activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityState {
    /// Keyboard in use
    Active,
    /// No input for the inactivity timeout; LEDs suppressed
    Idle,
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityState::Active => f.write_str("Active"),
            ActivityState::Idle => f.write_str("Idle"),
        }
    }
}
