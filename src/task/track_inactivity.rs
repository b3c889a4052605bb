//! Inactivity tracking
//!
//! Monitors key activity and puts the indicators to sleep after a timeout.
//!
//! The key scanner must call [`activity::signal_activity`] on every key
//! event; without it the keyboard goes idle 30 s after boot and never wakes.

use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use modelk_leds::system::activity::{self, ActivityState};
use modelk_leds::system::event::{self, Events};

/// Idle timeout (s)
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(30);

/// Inactivity monitoring task
#[embassy_executor::task]
pub async fn track_inactivity() {
    loop {
        match select(Timer::after(INACTIVITY_TIMEOUT), activity::wait()).await {
            Either::First(_) => {
                info!("No activity for {} s", INACTIVITY_TIMEOUT.as_secs());
                event::send(Events::ActivityChanged(ActivityState::Idle)).await;
                // Stay idle until the next key event.
                activity::wait().await;
                event::send(Events::ActivityChanged(ActivityState::Active)).await;
            }
            Either::Second(_) => {
                continue;
            }
        }
    }
}
