//! LED indicator task
//!
//! Applies every notification on the event channel to the controller and
//! renders the result.

use modelk_leds::run_events;
use modelk_leds::system::event;

use super::{SharedController, BLINK};

#[embassy_executor::task]
pub async fn indicate(controller: &'static SharedController) {
    run_events(controller, event::receiver(), &BLINK).await
}
