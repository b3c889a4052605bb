//! Model K firmware entry point
//!
//! Brings up the indicator LEDs and spawns the tasks that keep them in sync
//! with the host and link status.
//!
//! Inputs come in through the library's hook points, which the keyboard
//! firmware wires up:
//! - key scanner: `system::activity::signal_activity` on every key event
//! - USB HID output reports: `system::host::publish_indicators`
//! - USB/BLE endpoint selection: `system::host::publish_transport`
//! - BLE profile callbacks: `publish_active_profile`,
//!   `publish_profile_connected`, `publish_profile_bonded`

#![no_std]
#![no_main]

use crate::task::{
    blink::blink, indicate::indicate, resources::AssignedResources,
    resources::LedResources, track_inactivity::track_inactivity, Controller, SharedController,
};
use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_sync::mutex::Mutex;
use modelk_leds::system::host::HOST_STATUS;
use modelk_leds::{Config, IndicatorController, LedPins, Polarity};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Task implementations
mod task;

static CONTROLLER: StaticCell<SharedController> = StaticCell::new();

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(embassy_rp::config::Config::default());
    let r = split_resources!(p);

    let controller = match setup_leds(r.leds) {
        Ok(controller) => controller,
        Err(e) => {
            // LED tasks stay down; the rest of the keyboard keeps working.
            error!("Indicator LEDs disabled: {}", e);
            return;
        }
    };
    let controller = CONTROLLER.init(Mutex::new(controller));
    info!("Spawning indicator tasks");

    spawner.spawn(indicate(controller)).unwrap();
    spawner.spawn(blink(controller)).unwrap();
    spawner.spawn(track_inactivity()).unwrap();
}

fn setup_leds(r: LedResources) -> Result<Controller, modelk_leds::DriverError> {
    let leds = LedPins::new(
        Output::new(r.num_lock_pin, Level::Low),
        Output::new(r.caps_lock_pin, Level::Low),
        Output::new(r.link_pin, Level::Low),
        Polarity::ActiveHigh,
    );
    IndicatorController::setup(leds, &HOST_STATUS, &HOST_STATUS, Config::default())
}
