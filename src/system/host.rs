//! Host Status
//!
//! Authoritative HID indicator and wireless link state, written by the USB
//! and BLE stacks and pulled by the indicator controller.
//!
//! Writers use the `publish_*` functions, which update [`HOST_STATUS`] and,
//! when something actually changed, post the matching notification on the
//! event channel. All of it is lock-free and non-blocking, so it can be
//! called from interrupt handlers and radio callbacks.
//!
//! # Model
//! - HID indicators are tracked per endpoint: one slot for USB and one per
//!   BLE profile. The "current" indicators are those of the selected
//!   endpoint.
//! - The selected endpoint is the selected transport plus, for BLE, the
//!   active profile.
//! - A BLE profile is open (pairing) while it has no bonded peer.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::source::{HidIndicators, IndicatorSource, LinkSource, Transport};
use crate::system::event::{self, Events};

/// Number of BLE profiles the keyboard can be paired with
pub const BLE_PROFILE_COUNT: usize = 5;

const TRANSPORT_USB: u8 = 0;
const TRANSPORT_BLE: u8 = 1;

/// Process-wide host status
pub static HOST_STATUS: HostStatus = HostStatus::new();

/// A place HID reports can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    Usb,
    /// BLE profile index
    Ble(u8),
}

impl Endpoint {
    /// Slot in the per-endpoint indicator table, if the endpoint exists.
    fn slot(&self) -> Option<usize> {
        match *self {
            Endpoint::Usb => Some(0),
            Endpoint::Ble(profile) if usize::from(profile) < BLE_PROFILE_COUNT => {
                Some(1 + usize::from(profile))
            }
            Endpoint::Ble(_) => None,
        }
    }
}

/// HID indicator and link status
pub struct HostStatus {
    indicators: [AtomicU8; 1 + BLE_PROFILE_COUNT],
    transport: AtomicU8,
    active_profile: AtomicU8,
    /// One bit per BLE profile
    connected: AtomicU8,
    /// One bit per BLE profile
    bonded: AtomicU8,
}

impl HostStatus {
    /// Nothing connected, nothing bonded, USB selected, profile 0 active.
    pub const fn new() -> Self {
        Self {
            indicators: [const { AtomicU8::new(0) }; 1 + BLE_PROFILE_COUNT],
            transport: AtomicU8::new(TRANSPORT_USB),
            active_profile: AtomicU8::new(0),
            connected: AtomicU8::new(0),
            bonded: AtomicU8::new(0),
        }
    }

    /// Record the indicator report a host sent on `endpoint`.
    ///
    /// Returns whether the stored value changed. Reports for a profile that
    /// does not exist are ignored.
    pub fn set_indicators(&self, endpoint: Endpoint, flags: HidIndicators) -> bool {
        match endpoint.slot() {
            Some(slot) => {
                self.indicators[slot].swap(flags.bits(), Ordering::Relaxed) != flags.bits()
            }
            None => false,
        }
    }

    pub fn select_transport(&self, transport: Transport) -> bool {
        let value = match transport {
            Transport::Usb => TRANSPORT_USB,
            Transport::Ble => TRANSPORT_BLE,
        };
        self.transport.swap(value, Ordering::Relaxed) != value
    }

    pub fn selected_transport(&self) -> Transport {
        match self.transport.load(Ordering::Relaxed) {
            TRANSPORT_BLE => Transport::Ble,
            _ => Transport::Usb,
        }
    }

    /// Make `profile` the active BLE profile. Out-of-range indices are
    /// ignored.
    pub fn set_active_profile(&self, profile: u8) -> bool {
        if usize::from(profile) >= BLE_PROFILE_COUNT {
            return false;
        }
        self.active_profile.swap(profile, Ordering::Relaxed) != profile
    }

    pub fn active_profile(&self) -> u8 {
        self.active_profile.load(Ordering::Relaxed)
    }

    pub fn set_profile_connected(&self, profile: u8, connected: bool) -> bool {
        Self::set_bit(&self.connected, profile, connected)
    }

    pub fn set_profile_bonded(&self, profile: u8, bonded: bool) -> bool {
        Self::set_bit(&self.bonded, profile, bonded)
    }

    /// The endpoint HID traffic currently goes to.
    pub fn selected_endpoint(&self) -> Endpoint {
        match self.selected_transport() {
            Transport::Usb => Endpoint::Usb,
            Transport::Ble => Endpoint::Ble(self.active_profile()),
        }
    }

    fn set_bit(bits: &AtomicU8, profile: u8, value: bool) -> bool {
        if usize::from(profile) >= BLE_PROFILE_COUNT {
            return false;
        }
        let mask = 1u8 << profile;
        let old = if value {
            bits.fetch_or(mask, Ordering::Relaxed)
        } else {
            bits.fetch_and(!mask, Ordering::Relaxed)
        };
        (old & mask != 0) != value
    }

    fn active_bit(&self, bits: &AtomicU8) -> bool {
        bits.load(Ordering::Relaxed) & (1u8 << self.active_profile()) != 0
    }
}

impl Default for HostStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorSource for HostStatus {
    fn current(&self) -> HidIndicators {
        let bits = self
            .selected_endpoint()
            .slot()
            .map_or(0, |slot| self.indicators[slot].load(Ordering::Relaxed));
        HidIndicators::from_bits_retain(bits)
    }
}

impl LinkSource for HostStatus {
    fn is_transport_selected(&self, transport: Transport) -> bool {
        self.selected_transport() == transport
    }

    fn is_active_profile_connected(&self) -> bool {
        self.active_bit(&self.connected)
    }

    fn is_active_profile_open(&self) -> bool {
        !self.active_bit(&self.bonded)
    }
}

/// Host sent a new keyboard LED output report on `endpoint`.
pub fn publish_indicators(endpoint: Endpoint, flags: HidIndicators) {
    if HOST_STATUS.set_indicators(endpoint, flags) {
        event::try_send(Events::LockIndicatorsChanged);
    }
}

/// Output endpoint switched between USB and BLE.
pub fn publish_transport(transport: Transport) {
    if HOST_STATUS.select_transport(transport) {
        info!("Selected transport changed");
        // The current indicators follow the selected endpoint.
        event::try_send(Events::LinkStatusChanged);
        event::try_send(Events::LockIndicatorsChanged);
    }
}

/// Active BLE profile changed.
pub fn publish_active_profile(profile: u8) {
    if HOST_STATUS.set_active_profile(profile) {
        event::try_send(Events::LinkStatusChanged);
        event::try_send(Events::LockIndicatorsChanged);
    }
}

/// A BLE profile connected or disconnected.
pub fn publish_profile_connected(profile: u8, connected: bool) {
    if HOST_STATUS.set_profile_connected(profile, connected) {
        event::try_send(Events::LinkStatusChanged);
    }
}

/// A BLE profile gained or lost its bonded peer.
pub fn publish_profile_bonded(profile: u8, bonded: bool) {
    if HOST_STATUS.set_profile_bonded(profile, bonded) {
        event::try_send(Events::LinkStatusChanged);
    }
}
