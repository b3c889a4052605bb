//! Indicator State
//!
//! The last-known logical value of every input the LEDs are derived from.
//!
//! One instance exists per controller and lives for the whole process. It is
//! owned by [`IndicatorController`](crate::controller::IndicatorController),
//! which sits behind a mutex shared by the event path and the blink path, so
//! the link fields and the blink phase are always read as one consistent
//! snapshot.
//!
//! # Writers
//! - Lock-key reducer: `numlock_on`, `capslock_on`
//! - Link reducer: `link_connected`, `link_pairing`
//! - Activity reducer: `device_idle`
//! - Blink scheduler: `blink_phase`
//!
//! Idle suppresses output only. The logical values are kept, so waking up
//! renders the last known state without waiting for new input.

/// Logical indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorState {
    /// Num Lock requested by the host
    pub(crate) numlock_on: bool,
    /// Caps Lock requested by the host
    pub(crate) capslock_on: bool,
    /// Low-power idle
    /// - true: keyboard idle, LEDs suppressed
    /// - false: keyboard in use
    pub(crate) device_idle: bool,
    /// Wireless transport selected and its active profile connected
    pub(crate) link_connected: bool,
    /// Active wireless profile open for pairing. Independent of
    /// `link_connected`.
    pub(crate) link_pairing: bool,
    /// Current phase of the pairing blink. Always false while the blink
    /// scheduler is stopped.
    pub(crate) blink_phase: bool,
}

impl IndicatorState {
    /// Boot state: everything false.
    pub const fn new() -> Self {
        Self {
            numlock_on: false,
            capslock_on: false,
            device_idle: false,
            link_connected: false,
            link_pairing: false,
            blink_phase: false,
        }
    }

    pub fn numlock_on(&self) -> bool {
        self.numlock_on
    }

    pub fn capslock_on(&self) -> bool {
        self.capslock_on
    }

    pub fn device_idle(&self) -> bool {
        self.device_idle
    }

    pub fn link_connected(&self) -> bool {
        self.link_connected
    }

    pub fn link_pairing(&self) -> bool {
        self.link_pairing
    }

    pub fn blink_phase(&self) -> bool {
        self.blink_phase
    }

    /// Whether the link LED should be blinking: pairing with nothing
    /// connected. A live connection takes precedence over an open profile.
    pub fn link_blinking(&self) -> bool {
        self.link_pairing && !self.link_connected
    }
}
