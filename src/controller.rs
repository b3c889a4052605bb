//! Indicator Controller
//!
//! Owns the indicator state, the blink scheduler and the LED driver, and wires
//! the reducers to the render function:
//!
//! ```text
//! notification -> reducer(s) -> render all LEDs
//! blink tick   -> flip phase -> render link LED
//! ```
//!
//! The controller is shared between the event runner and the blink runner
//! behind an `embassy_sync` mutex, so a tick can never observe a half-applied
//! link update.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Ticker;

use crate::blink::{BlinkCommand, BlinkScheduler};
use crate::config::Config;
use crate::error::DriverError;
use crate::led::LedDriver;
use crate::reducer;
use crate::render;
use crate::source::{IndicatorSource, LinkSource};
use crate::system::activity::ActivityState;
use crate::system::event::Events;
use crate::system::state::IndicatorState;

pub struct IndicatorController<D, H, L> {
    state: IndicatorState,
    blink: BlinkScheduler,
    leds: D,
    indicators: H,
    link: L,
    config: Config,
}

impl<D, H, L> IndicatorController<D, H, L>
where
    D: LedDriver,
    H: IndicatorSource,
    L: LinkSource,
{
    /// One-time setup at boot.
    ///
    /// Drives every LED OFF, then pulls the current HID and link state and
    /// renders it, since the host may have set indicators or a profile may
    /// already be pairing before the controller started. Fails on the first
    /// LED that cannot be configured; no controller exists in that case.
    ///
    /// If pairing is already in progress the blink scheduler is left running;
    /// [`run_blink`] picks that up without waiting for a command.
    pub fn setup(
        mut leds: D,
        indicators: H,
        link: L,
        config: Config,
    ) -> Result<Self, DriverError> {
        if let Err(e) = leds.init() {
            error!("{}", e);
            return Err(e);
        }

        let mut controller = Self {
            state: IndicatorState::new(),
            blink: BlinkScheduler::new(),
            leds,
            indicators,
            link,
            config,
        };
        controller.refresh();
        controller.render();

        info!("LEDs initialized successfully");
        Ok(controller)
    }

    /// Apply one notification and render.
    ///
    /// Returns the blink scheduler transition it caused, if any.
    pub fn handle(&mut self, event: Events) -> Option<BlinkCommand> {
        match event {
            Events::ActivityChanged(ActivityState::Idle) => {
                reducer::activity(&mut self.state, ActivityState::Idle);
                self.render();
                None
            }
            Events::ActivityChanged(ActivityState::Active) => {
                reducer::activity(&mut self.state, ActivityState::Active);
                // Notifications may have been missed or coalesced while idle.
                let command = self.refresh();
                self.render();
                command
            }
            Events::LockIndicatorsChanged | Events::LinkStatusChanged => {
                let command = self.refresh();
                self.render();
                command
            }
        }
    }

    /// One blink period elapsed. Flips the phase and redraws the link LED.
    ///
    /// Returns false if the scheduler was stopped meanwhile.
    pub fn blink_tick(&mut self) -> bool {
        if !self.blink.tick(&mut self.state) {
            return false;
        }
        render::render_link(&self.state, self.config.idle_policy, &mut self.leds);
        true
    }

    /// Write every LED from the current state. Returns the number of failed
    /// writes.
    pub fn render(&mut self) -> usize {
        render::render(&self.state, self.config.idle_policy, &mut self.leds)
    }

    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_running()
    }

    pub fn leds(&self) -> &D {
        &self.leds
    }

    /// Re-run both status reducers.
    fn refresh(&mut self) -> Option<BlinkCommand> {
        let command = reducer::link_status(&mut self.state, &mut self.blink, &self.link);
        reducer::lock_indicators(&mut self.state, &self.indicators);
        command
    }
}

/// Event loop: apply every notification and forward blink transitions.
pub async fn run_events<M, D, H, L, const N: usize>(
    controller: &Mutex<M, IndicatorController<D, H, L>>,
    events: Receiver<'_, M, Events, N>,
    blink: &Signal<M, BlinkCommand>,
) where
    M: RawMutex,
    D: LedDriver,
    H: IndicatorSource,
    L: LinkSource,
{
    loop {
        let event = events.receive().await;
        let command = controller.lock().await.handle(event);
        if let Some(command) = command {
            blink.signal(command);
        }
    }
}

/// Blink timer: ticks the controller every `blink_interval` while the
/// scheduler runs, and sleeps otherwise.
pub async fn run_blink<M, D, H, L>(
    controller: &Mutex<M, IndicatorController<D, H, L>>,
    blink: &Signal<M, BlinkCommand>,
) where
    M: RawMutex,
    D: LedDriver,
    H: IndicatorSource,
    L: LinkSource,
{
    loop {
        // Setup may have left the scheduler running.
        if !controller.lock().await.is_blinking() {
            while blink.wait().await != BlinkCommand::Start {}
        }

        let interval = controller.lock().await.config().blink_interval;
        let mut ticker = Ticker::every(interval);

        loop {
            match select(ticker.next(), blink.wait()).await {
                Either::First(()) => {
                    if !controller.lock().await.blink_tick() {
                        break;
                    }
                }
                Either::Second(BlinkCommand::Start) => ticker.reset(),
                Either::Second(BlinkCommand::Stop) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embassy_time::{Duration, Instant, Timer};

    use super::*;
    use crate::config::IdlePolicy;
    use crate::led::testing::RecordingDriver;
    use crate::led::Led;
    use crate::reducer::testing::{FakeHid, FakeLink};

    type TestController<'a> = IndicatorController<RecordingDriver, &'a FakeHid, &'a FakeLink>;

    fn setup<'a>(hid: &'a FakeHid, link: &'a FakeLink) -> TestController<'a> {
        IndicatorController::setup(RecordingDriver::new(), hid, link, Config::default()).unwrap()
    }

    fn frame_of(controller: &TestController<'_>) -> [Option<bool>; 3] {
        Led::ALL.map(|led| controller.leds().last(led))
    }

    #[test]
    fn boot_with_nothing_going_on_is_dark() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        let controller = setup(&hid, &link);

        assert_eq!(frame_of(&controller), [Some(false); 3]);
        assert!(!controller.is_blinking());
        // init drove everything off before the first render.
        assert_eq!(
            controller.leds().writes[..3],
            [(Led::NumLock, false), (Led::CapsLock, false), (Led::Link, false)]
        );
    }

    #[test]
    fn boot_pulls_current_state() {
        let hid = FakeHid::default();
        hid.flags.set(0x02);
        let link = FakeLink::pairing();
        let controller = setup(&hid, &link);

        assert!(controller.state().capslock_on());
        assert_eq!(controller.leds().last(Led::CapsLock), Some(true));
        assert!(controller.is_blinking());
    }

    #[test]
    fn setup_fails_fast() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        let mut leds = RecordingDriver::new();
        leds.fail_init = Some(Led::CapsLock);

        let result = IndicatorController::setup(leds, &hid, &link, Config::default());
        match result {
            Err(e) => assert_eq!(e.led(), Led::CapsLock),
            Ok(_) => panic!("setup should fail"),
        }
    }

    #[test]
    fn numlock_change_leaves_link_alone() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        link.ble_selected.set(true);
        link.connected.set(true);
        let mut controller = setup(&hid, &link);
        assert_eq!(controller.leds().last(Led::Link), Some(true));

        hid.flags.set(0x01);
        assert_eq!(controller.handle(Events::LockIndicatorsChanged), None);
        assert_eq!(frame_of(&controller), [Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn pairing_blinks_then_settles_on_connect() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        let mut controller = setup(&hid, &link);

        link.ble_selected.set(true);
        link.open.set(true);
        assert_eq!(
            controller.handle(Events::LinkStatusChanged),
            Some(BlinkCommand::Start)
        );

        let before = controller.leds().history(Led::Link).len();
        for _ in 0..4 {
            assert!(controller.blink_tick());
        }
        let link_writes = controller.leds().history(Led::Link);
        assert_eq!(link_writes[before..], [true, false, true, false]);

        link.connected.set(true);
        assert_eq!(
            controller.handle(Events::LinkStatusChanged),
            Some(BlinkCommand::Stop)
        );
        assert_eq!(controller.leds().last(Led::Link), Some(true));

        // A tick already in flight when the stop landed changes nothing.
        let writes = controller.leds().writes.len();
        assert!(!controller.blink_tick());
        assert_eq!(controller.leds().writes.len(), writes);
    }

    #[test]
    fn pairing_ends_without_connection() {
        let hid = FakeHid::default();
        let link = FakeLink::pairing();
        let mut controller = setup(&hid, &link);
        controller.blink_tick();
        assert_eq!(controller.leds().last(Led::Link), Some(true));

        link.open.set(false);
        assert_eq!(
            controller.handle(Events::LinkStatusChanged),
            Some(BlinkCommand::Stop)
        );
        assert_eq!(controller.leds().last(Led::Link), Some(false));
        assert!(!controller.state().blink_phase());
    }

    #[test]
    fn idle_while_pairing_keeps_blinking() {
        let hid = FakeHid::default();
        hid.flags.set(0x03);
        let link = FakeLink::pairing();
        let mut controller = setup(&hid, &link);

        assert_eq!(
            controller.handle(Events::ActivityChanged(ActivityState::Idle)),
            None
        );
        assert_eq!(controller.leds().last(Led::NumLock), Some(false));
        assert_eq!(controller.leds().last(Led::CapsLock), Some(false));
        assert!(controller.is_blinking());

        controller.blink_tick();
        assert_eq!(controller.leds().last(Led::Link), Some(true));
        controller.blink_tick();
        assert_eq!(controller.leds().last(Led::Link), Some(false));
    }

    #[test]
    fn idle_with_all_off_policy() {
        let hid = FakeHid::default();
        let link = FakeLink::pairing();
        let config = Config {
            idle_policy: IdlePolicy::AllOff,
            ..Config::default()
        };
        let mut controller =
            IndicatorController::setup(RecordingDriver::new(), &hid, &link, config).unwrap();

        controller.handle(Events::ActivityChanged(ActivityState::Idle));
        controller.blink_tick();
        assert_eq!(frame_of(&controller), [Some(false); 3]);
    }

    #[test]
    fn idle_hides_but_keeps_state_and_wake_pulls_fresh_flags() {
        let hid = FakeHid::default();
        hid.flags.set(0x01);
        let link = FakeLink::default();
        link.ble_selected.set(true);
        link.connected.set(true);
        let mut controller = setup(&hid, &link);

        controller.handle(Events::ActivityChanged(ActivityState::Idle));
        assert_eq!(frame_of(&controller), [Some(false); 3]);
        assert!(controller.state().numlock_on());

        // The host toggles Caps Lock while the notification is lost.
        hid.flags.set(0x02);

        controller.handle(Events::ActivityChanged(ActivityState::Active));
        assert_eq!(frame_of(&controller), [Some(false), Some(true), Some(true)]);
    }

    #[test]
    fn wake_restarts_blink_missed_while_idle() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        let mut controller = setup(&hid, &link);
        controller.handle(Events::ActivityChanged(ActivityState::Idle));

        link.open.set(true);
        assert_eq!(
            controller.handle(Events::ActivityChanged(ActivityState::Active)),
            Some(BlinkCommand::Start)
        );
    }

    #[test]
    fn write_failures_do_not_stick() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        let mut controller = setup(&hid, &link);
        controller.leds.fail.push(Led::NumLock);

        hid.flags.set(0x01);
        controller.handle(Events::LockIndicatorsChanged);
        assert_eq!(controller.leds().last(Led::NumLock), Some(false));

        controller.leds.fail.clear();
        controller.handle(Events::LockIndicatorsChanged);
        assert_eq!(controller.leds().last(Led::NumLock), Some(true));
    }

    #[test]
    fn event_runner_forwards_blink_commands() {
        let hid = FakeHid::default();
        let link = FakeLink::default();
        let controller = Mutex::<NoopRawMutex, _>::new(setup(&hid, &link));
        let events = Channel::<NoopRawMutex, Events, 4>::new();
        let blink = Signal::<NoopRawMutex, BlinkCommand>::new();

        link.open.set(true);
        events.try_send(Events::LinkStatusChanged).unwrap();

        block_on(async {
            let runner = run_events(&controller, events.receiver(), &blink);
            match select(runner, blink.wait()).await {
                Either::First(()) => unreachable!(),
                Either::Second(command) => assert_eq!(command, BlinkCommand::Start),
            }
        });
        assert!(block_on(controller.lock()).is_blinking());
    }

    #[test]
    fn blink_runner_toggles_until_stopped() {
        let hid = FakeHid::default();
        let link = FakeLink::pairing();
        let config = Config {
            blink_interval: Duration::from_millis(10),
            ..Config::default()
        };
        let controller = Mutex::<NoopRawMutex, _>::new(
            IndicatorController::setup(RecordingDriver::new(), &hid, &link, config).unwrap(),
        );
        let blink = Signal::<NoopRawMutex, BlinkCommand>::new();

        let start = Instant::now();
        let running_for = block_on(async {
            let runner = run_blink(&controller, &blink);
            let stopper = async {
                Timer::after(Duration::from_millis(75)).await;
                link.open.set(false);
                let mut controller = controller.lock().await;
                let running_for = start.elapsed();
                assert_eq!(
                    controller.handle(Events::LinkStatusChanged),
                    Some(BlinkCommand::Stop)
                );
                drop(controller);
                blink.signal(BlinkCommand::Stop);
                Timer::after(Duration::from_millis(50)).await;
                running_for
            };
            match select(runner, stopper).await {
                Either::First(()) => unreachable!(),
                Either::Second(running_for) => running_for,
            }
        });

        let controller = block_on(controller.lock());
        let link_writes = controller.leds().history(Led::Link);
        // Boot renders (off, off), then one alternating tick per interval.
        let ticks = &link_writes[2..link_writes.len() - 1];
        let expected = running_for.as_millis() / 10;
        assert!(
            (ticks.len() as u64).abs_diff(expected) <= 1,
            "{} ticks in {} ms",
            ticks.len(),
            running_for.as_millis()
        );
        for (i, on) in ticks.iter().enumerate() {
            assert_eq!(*on, i % 2 == 0);
        }
        // Settled off after the stop, no ticks after it.
        assert_eq!(link_writes.last(), Some(&false));
        assert!(!controller.state().blink_phase());
    }
}
