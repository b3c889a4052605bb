//! Indicator configuration

use embassy_time::Duration;

/// Interval between pairing blink toggles. Also the delay before the first
/// toggle after pairing starts.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// What the LEDs show while the keyboard is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdlePolicy {
    /// Lock LEDs go dark, but an in-progress pairing keeps blinking.
    #[default]
    KeepPairingBlink,
    /// Every LED goes dark, pairing included.
    AllOff,
}

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub blink_interval: Duration,
    pub idle_policy: IdlePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blink_interval: BLINK_INTERVAL,
            idle_policy: IdlePolicy::default(),
        }
    }
}
