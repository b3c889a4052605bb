//! Pull interfaces to the HID and wireless link subsystems.
//!
//! The controller never trusts notification payloads; every reducer re-reads
//! the authoritative state through these traits.

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Keyboard LED indicator bits from the host's HID output report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HidIndicators: u8 {
        const NUM_LOCK = 0x01;
        const CAPS_LOCK = 0x02;
        const SCROLL_LOCK = 0x04;
        const COMPOSE = 0x08;
        const KANA = 0x10;
    }
}

impl HidIndicators {
    pub fn num_lock(&self) -> bool {
        self.contains(HidIndicators::NUM_LOCK)
    }

    pub fn caps_lock(&self) -> bool {
        self.contains(HidIndicators::CAPS_LOCK)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HidIndicators {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "HidIndicators({=u8:#x})", self.bits())
    }
}

impl fmt::Display for HidIndicators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.bits())
    }
}

/// Transports a keyboard endpoint can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transport {
    Usb,
    Ble,
}

/// Current HID indicator flags.
pub trait IndicatorSource {
    /// Indicator bitmask for the currently selected endpoint.
    fn current(&self) -> HidIndicators;
}

/// Current wireless link state.
pub trait LinkSource {
    /// Whether `transport` carries the currently selected endpoint.
    fn is_transport_selected(&self, transport: Transport) -> bool;

    /// Whether the active wireless profile has a live connection.
    fn is_active_profile_connected(&self) -> bool;

    /// Whether the active wireless profile is open, i.e. advertising and
    /// accepting a new pairing.
    fn is_active_profile_open(&self) -> bool;
}

impl<T: IndicatorSource + ?Sized> IndicatorSource for &T {
    fn current(&self) -> HidIndicators {
        (**self).current()
    }
}

impl<T: LinkSource + ?Sized> LinkSource for &T {
    fn is_transport_selected(&self, transport: Transport) -> bool {
        (**self).is_transport_selected(transport)
    }

    fn is_active_profile_connected(&self) -> bool {
        (**self).is_active_profile_connected()
    }

    fn is_active_profile_open(&self) -> bool {
        (**self).is_active_profile_open()
    }
}
