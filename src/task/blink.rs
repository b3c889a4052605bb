//! Pairing blink task

use modelk_leds::run_blink;

use super::{SharedController, BLINK};

/// Toggles the link LED while a profile is open for pairing.
#[embassy_executor::task]
pub async fn blink(controller: &'static SharedController) {
    run_blink(controller, &BLINK).await
}
