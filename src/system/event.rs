//! System Events
//!
//! Defines the notifications the indicator controller reacts to and the
//! channel they travel on.
//!
//! Status notifications carry no payload. The controller re-reads the
//! authoritative HID and link state on every one of them, so delivery order
//! across sources does not matter and a dropped duplicate loses nothing.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};

use crate::system::activity::ActivityState;

/// Event queue depth
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Multi-producer, single-consumer event channel
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Events, EVENT_QUEUE_DEPTH> =
    Channel::new();

/// Sends an event to the system channel, waiting for room if it is full
pub async fn send(event: Events) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Sends an event without waiting. Safe from interrupt context.
///
/// Returns false if the channel was full and the event was dropped.
pub fn try_send(event: Events) -> bool {
    match EVENT_CHANNEL.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            warn!("Event queue full, dropped {}", event);
            false
        }
    }
}

/// Receives the next event from the system channel
pub async fn wait() -> Events {
    EVENT_CHANNEL.receive().await
}

/// Receiving end of the system channel, for the event runner
pub fn receiver() -> Receiver<'static, CriticalSectionRawMutex, Events, EVENT_QUEUE_DEPTH> {
    EVENT_CHANNEL.receiver()
}

/// Notifications delivered to the indicator controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Events {
    /// Keyboard entered or left low-power idle
    ActivityChanged(ActivityState),
    /// Host HID indicator flags changed
    LockIndicatorsChanged,
    /// Selected endpoint, active profile, connection or pairing state changed
    LinkStatusChanged,
}

impl fmt::Display for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Events::ActivityChanged(state) => write!(f, "ActivityChanged({state})"),
            Events::LockIndicatorsChanged => f.write_str("LockIndicatorsChanged"),
            Events::LinkStatusChanged => f.write_str("LinkStatusChanged"),
        }
    }
}
