//! Firmware tasks
//!
//! Embassy tasks cannot be generic, so the controller is pinned to the board
//! types here and shared between the tasks through a mutex.

use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use modelk_leds::blink::BlinkCommand;
use modelk_leds::system::host::HostStatus;
use modelk_leds::{IndicatorController, LedPins};

pub mod blink;
pub mod indicate;
pub mod resources;
pub mod track_inactivity;

/// Indicator controller on the board's GPIO outputs, fed by the global host status
pub type Controller =
    IndicatorController<LedPins<Output<'static>>, &'static HostStatus, &'static HostStatus>;

/// Controller shared by the event and blink tasks
pub type SharedController = Mutex<CriticalSectionRawMutex, Controller>;

/// Blink start/stop commands from the event task to the blink task
pub static BLINK: Signal<CriticalSectionRawMutex, BlinkCommand> = Signal::new();
