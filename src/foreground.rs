//! The foreground loop: buttons in, mode changes and edits out.
//!
//! See [`Foreground`] for usage.

pub mod state;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use self::state::ProgramState;
use crate::Result;
use crate::buttons::{ButtonLevels, Buttons};
use crate::clock_state::ClockStatic;
use crate::constants::{HOLD_CONFIRM_MS, RELEASE_POLL_MS};
use crate::display::{SharedPanel, with_panel};
use crate::never::Never;

/// What a blocking render in the foreground shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Time,
    Alarm,
}

/// The hardware and shared state a [`ProgramState`] step works with.
pub struct Controls<'a, O, I, D> {
    clock: &'a ClockStatic,
    panel: &'a SharedPanel<O, I, D>,
    buttons: Buttons<I>,
    delay: D,
}

impl<O: OutputPin, I: InputPin, D: DelayNs> Controls<'_, O, I, D> {
    fn read(&mut self) -> Result<ButtonLevels> {
        self.buttons.read()
    }

    fn snooze_pressed(&mut self) -> Result<bool> {
        self.buttons.snooze_pressed()
    }

    /// Waits out the hold delay and reads again: the gesture counts only if it is still held.
    fn confirm_hold(&mut self, still_held: fn(&ButtonLevels) -> bool) -> Result<bool> {
        self.delay.delay_ms(HOLD_CONFIRM_MS);
        Ok(still_held(&self.buttons.read()?))
    }

    fn wait_for_snooze_release(&mut self) -> Result<()> {
        while self.buttons.snooze_pressed()? {
            self.delay.delay_ms(RELEASE_POLL_MS);
        }
        Ok(())
    }

    fn render(&self, view: View, time_on: u16) -> Result<()> {
        let clock = self.clock;
        with_panel(self.panel, |panel| match view {
            View::Time => panel.render_time(clock, time_on),
            View::Alarm => panel.render_alarm(clock, time_on),
        })
    }

    fn blank_for(&self, ms: u32) -> Result<()> {
        with_panel(self.panel, |panel| panel.blank_for(ms))
    }
}

/// Polls the buttons, runs the mode state machine, and keeps the alarm in step with the
/// switch.
///
/// The display refresh and the once-a-second tick run elsewhere against the same
/// [`ClockStatic`] and [`SharedPanel`]; the foreground suspends the refresh whenever it draws
/// the display itself.
pub struct Foreground<'a, O, I, D> {
    controls: Controls<'a, O, I, D>,
    state: ProgramState,
}

impl<'a, O: OutputPin, I: InputPin, D: DelayNs> Foreground<'a, O, I, D> {
    pub const fn new(
        clock: &'a ClockStatic,
        panel: &'a SharedPanel<O, I, D>,
        buttons: Buttons<I>,
        delay: D,
    ) -> Self {
        Self {
            controls: Controls {
                clock,
                panel,
                buttons,
                delay,
            },
            state: ProgramState::ShowTime,
        }
    }

    /// The power-up chirp.
    ///
    /// # Errors
    ///
    /// Returns an error if the buzzer cannot be driven.
    pub fn power_up_siren(&self) -> Result<()> {
        with_panel(self.controls.panel, |panel| panel.sound_siren())
    }

    /// One foreground iteration: a state machine step, then the alarm check.
    ///
    /// Every display cycle also checks the alarm, so a long step cannot keep a disarmed alarm
    /// ringing.
    ///
    /// # Errors
    ///
    /// Returns an error if a button or the switch cannot be read or the display cannot be
    /// driven.
    pub fn poll(&mut self) -> Result<()> {
        self.state = self.state.execute(&mut self.controls)?;
        let clock = self.controls.clock;
        with_panel(self.controls.panel, |panel| panel.sync_alarm(clock))
    }

    /// Polls forever.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Foreground::poll`].
    pub fn run(mut self) -> Result<Never> {
        loop {
            self.poll()?;
        }
    }

    #[must_use]
    pub const fn state(&self) -> ProgramState {
        self.state
    }
}
