//! Pairing blink scheduler
//!
//! `Stopped -> Running -> Stopped`. The scheduler itself is a plain state
//! machine; the periodic timer that calls [`BlinkScheduler::tick`] lives in
//! [`run_blink`](crate::controller::run_blink) and is told to start or stop
//! through [`BlinkCommand`]s.

use core::fmt;

use crate::system::state::IndicatorState;

/// Start/stop request for the periodic blink timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkCommand {
    Start,
    Stop,
}

impl fmt::Display for BlinkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlinkCommand::Start => f.write_str("Start"),
            BlinkCommand::Stop => f.write_str("Stop"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    #[default]
    Stopped,
    Running,
}

/// Owner of `blink_phase`.
#[derive(Debug, Default)]
pub struct BlinkScheduler {
    phase: Phase,
}

impl BlinkScheduler {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Start blinking. The first toggle happens one interval from now.
    ///
    /// Returns `Some(Start)` on the `Stopped -> Running` transition and
    /// `None` if already running.
    pub fn start(&mut self, state: &mut IndicatorState) -> Option<BlinkCommand> {
        if self.is_running() {
            return None;
        }
        debug!("Pairing blink started");
        self.phase = Phase::Running;
        state.blink_phase = false;
        Some(BlinkCommand::Start)
    }

    /// Stop blinking and settle `blink_phase` to false. Idempotent.
    ///
    /// Returns `Some(Stop)` on the `Running -> Stopped` transition.
    pub fn stop(&mut self, state: &mut IndicatorState) -> Option<BlinkCommand> {
        state.blink_phase = false;
        if !self.is_running() {
            return None;
        }
        debug!("Pairing blink stopped");
        self.phase = Phase::Stopped;
        Some(BlinkCommand::Stop)
    }

    /// One timer period elapsed. Flips the phase if running.
    ///
    /// Returns false if the scheduler is stopped, in which case the tick is
    /// stale and nothing changed.
    pub fn tick(&mut self, state: &mut IndicatorState) -> bool {
        if !self.is_running() {
            return false;
        }
        state.blink_phase = !state.blink_phase;
        true
    }
}
