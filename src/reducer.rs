//! Input reducers
//!
//! One function per input source. Each re-reads the authoritative state from
//! its source and writes the fields it owns in [`IndicatorState`]. None of them
//! touch hardware; the caller renders afterwards.

use crate::blink::{BlinkCommand, BlinkScheduler};
use crate::source::{IndicatorSource, LinkSource, Transport};
use crate::system::activity::ActivityState;
use crate::system::state::IndicatorState;

/// Pull the host's lock-key indicators.
pub fn lock_indicators<S: IndicatorSource>(state: &mut IndicatorState, source: &S) {
    let flags = source.current();
    state.numlock_on = flags.num_lock();
    state.capslock_on = flags.caps_lock();

    info!(
        "NumLock: {}, CapsLock: {}",
        on_off(state.numlock_on),
        on_off(state.capslock_on)
    );
}

/// Pull the wireless link state and start or stop the pairing blink to match.
///
/// The only writer of `link_connected` and `link_pairing`, and the only place
/// the blink scheduler is started or stopped. Returns the scheduler
/// transition, if any, for the timer to act on.
pub fn link_status<S: LinkSource>(
    state: &mut IndicatorState,
    blink: &mut BlinkScheduler,
    source: &S,
) -> Option<BlinkCommand> {
    let selected = source.is_transport_selected(Transport::Ble);
    state.link_connected = selected && source.is_active_profile_connected();
    // An open profile advertises whether or not BLE is the output endpoint.
    state.link_pairing = source.is_active_profile_open();

    info!(
        "Link - Selected: {}, Connected: {}, Pairing: {}",
        yes_no(selected),
        yes_no(state.link_connected),
        yes_no(state.link_pairing)
    );

    if state.link_blinking() {
        blink.start(state)
    } else {
        blink.stop(state)
    }
}

/// Record an activity transition.
pub fn activity(state: &mut IndicatorState, activity: ActivityState) {
    state.device_idle = activity == ActivityState::Idle;
    info!("Keyboard is {}", activity);
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "YES"
    } else {
        "NO"
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Source fakes shared by the unit tests.

    use core::cell::Cell;

    use crate::source::{HidIndicators, IndicatorSource, LinkSource, Transport};

    #[derive(Default)]
    pub struct FakeHid {
        pub flags: Cell<u8>,
    }

    impl IndicatorSource for FakeHid {
        fn current(&self) -> HidIndicators {
            HidIndicators::from_bits_retain(self.flags.get())
        }
    }

    #[derive(Default)]
    pub struct FakeLink {
        pub ble_selected: Cell<bool>,
        pub connected: Cell<bool>,
        pub open: Cell<bool>,
    }

    impl FakeLink {
        /// BLE selected, nothing connected, profile open.
        pub fn pairing() -> Self {
            let link = Self::default();
            link.ble_selected.set(true);
            link.open.set(true);
            link
        }
    }

    impl LinkSource for FakeLink {
        fn is_transport_selected(&self, transport: Transport) -> bool {
            match transport {
                Transport::Ble => self.ble_selected.get(),
                Transport::Usb => !self.ble_selected.get(),
            }
        }

        fn is_active_profile_connected(&self) -> bool {
            self.connected.get()
        }

        fn is_active_profile_open(&self) -> bool {
            self.open.get()
        }
    }
}
