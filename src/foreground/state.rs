//! State machine for the button-driven modes: showing and setting the time and the alarm.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::{Controls, View};
use crate::Result;
use crate::buttons::ButtonLevels;
use crate::clock_state::{ClockStatic, ProgramMode};
use crate::constants::{
    EDIT_REPEATS, ENTRY_REPEATS, FLASH_OFF_MS, FLASH_ON_REPEATS, PROMPT_REPEATS,
    RAMP_HELD_THRESHOLD, RAMP_MAX_STEP, SET_ALARM_FLASHES, SET_TIME_FLASHES,
};
use crate::time_of_day::Direction;

/// Accelerating minute step for a held Up or Down button.
///
/// Every press in the same direction counts toward the next step increase; a press in the
/// other direction, or a poll with neither pressed, starts over at one minute.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRamp {
    previous: Option<Direction>,
    held_count: u8,
    step: u8,
}

impl Default for MinuteRamp {
    fn default() -> Self {
        Self::new()
    }
}

impl MinuteRamp {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: None,
            held_count: 0,
            step: 1,
        }
    }

    /// Records a press and returns the minutes it moves.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "held_count resets above the threshold and step is capped"
    )]
    pub fn press(&mut self, direction: Direction) -> u8 {
        if self.previous == Some(direction) {
            self.held_count += 1;
        } else {
            self.held_count = 0;
            self.step = 1;
        }
        self.previous = Some(direction);

        if self.held_count > RAMP_HELD_THRESHOLD {
            self.step = (self.step + 1).min(RAMP_MAX_STEP);
            self.held_count = 0;
        }
        self.step
    }

    pub const fn release(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn step(&self) -> u8 {
        self.step
    }
}

/// The foreground's modes. The editors carry their ramp.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgramState {
    #[default]
    ShowTime,
    SetTime(MinuteRamp),
    ShowAlarm,
    SetAlarm(MinuteRamp),
}

impl ProgramState {
    /// The plain mode published to the shared clock state.
    #[must_use]
    pub const fn program_mode(self) -> ProgramMode {
        match self {
            Self::ShowTime => ProgramMode::ShowTime,
            Self::SetTime(_) => ProgramMode::SetTime,
            Self::ShowAlarm => ProgramMode::ShowAlarm,
            Self::SetAlarm(_) => ProgramMode::SetAlarm,
        }
    }

    /// Run one step of this state and return the next state.
    ///
    /// # Errors
    ///
    /// Returns an error if a button cannot be read or the display cannot be driven.
    pub fn execute<O, I, D>(self, controls: &mut Controls<'_, O, I, D>) -> Result<Self>
    where
        O: OutputPin,
        I: InputPin,
        D: DelayNs,
    {
        match self {
            Self::ShowTime => Self::execute_show_time(controls),
            Self::SetTime(ramp) => Self::execute_set_time(ramp, controls),
            Self::ShowAlarm => Self::execute_show_alarm(controls),
            Self::SetAlarm(ramp) => Self::execute_set_alarm(ramp, controls),
        }
    }

    // Every change of mode goes through here so the display sees it.
    fn enter(self, clock: &ClockStatic) -> Self {
        clock.set_program_mode(self.program_mode());
        self
    }

    fn execute_show_time<O, I, D>(controls: &mut Controls<'_, O, I, D>) -> Result<Self>
    where
        O: OutputPin,
        I: InputPin,
        D: DelayNs,
    {
        let levels = controls.read()?;

        if levels.snooze && controls.clock.snooze() {
            return Ok(Self::ShowTime);
        }

        if levels.down_and_snooze() {
            if controls.confirm_hold(ButtonLevels::down_and_snooze)? {
                controls.clock.toggle_display_mode();
                controls.wait_for_snooze_release()?;
            }
            return Ok(Self::ShowTime);
        }

        if levels.up_and_down() {
            if !controls.confirm_hold(ButtonLevels::up_and_down)? {
                return Ok(Self::ShowTime);
            }
            controls.clock.suspend_refresh();
            let next = Self::SetTime(MinuteRamp::new()).enter(controls.clock);
            while controls.read()?.up_and_down() {
                controls.render(View::Time, ENTRY_REPEATS)?;
            }
            return Ok(next);
        }

        if levels.snooze {
            return Ok(Self::ShowAlarm.enter(controls.clock));
        }

        Ok(Self::ShowTime)
    }

    // Snooze held alone: show the alarm. Still held after the prompt means edit it.
    fn execute_show_alarm<O, I, D>(controls: &mut Controls<'_, O, I, D>) -> Result<Self>
    where
        O: OutputPin,
        I: InputPin,
        D: DelayNs,
    {
        controls.clock.suspend_refresh();
        controls.render(View::Alarm, PROMPT_REPEATS)?;

        if !controls.snooze_pressed()? {
            controls.clock.resume_refresh();
            return Ok(Self::ShowTime.enter(controls.clock));
        }

        while controls.snooze_pressed()? {
            controls.blank_for(FLASH_OFF_MS)?;
            controls.render(View::Alarm, FLASH_ON_REPEATS)?;
        }
        Ok(Self::SetAlarm(MinuteRamp::new()).enter(controls.clock))
    }

    fn execute_set_time<O, I, D>(
        ramp: MinuteRamp,
        controls: &mut Controls<'_, O, I, D>,
    ) -> Result<Self>
    where
        O: OutputPin,
        I: InputPin,
        D: DelayNs,
    {
        controls.render(View::Time, EDIT_REPEATS)?;
        let levels = controls.read()?;

        if levels.snooze {
            return Self::finish_editing(View::Time, SET_TIME_FLASHES, controls);
        }

        let mut ramp = ramp;
        match levels.direction() {
            Some(direction) => controls.clock.adjust_time(direction, ramp.press(direction))?,
            None => ramp.release(),
        }
        Ok(Self::SetTime(ramp))
    }

    fn execute_set_alarm<O, I, D>(
        ramp: MinuteRamp,
        controls: &mut Controls<'_, O, I, D>,
    ) -> Result<Self>
    where
        O: OutputPin,
        I: InputPin,
        D: DelayNs,
    {
        controls.render(View::Alarm, EDIT_REPEATS)?;
        let levels = controls.read()?;

        if levels.snooze {
            return Self::finish_editing(View::Alarm, SET_ALARM_FLASHES, controls);
        }

        let mut ramp = ramp;
        match levels.direction() {
            Some(direction) => controls.clock.adjust_alarm(direction, ramp.press(direction)),
            None => ramp.release(),
        }
        Ok(Self::SetAlarm(ramp))
    }

    fn finish_editing<O, I, D>(
        view: View,
        flashes: u8,
        controls: &mut Controls<'_, O, I, D>,
    ) -> Result<Self>
    where
        O: OutputPin,
        I: InputPin,
        D: DelayNs,
    {
        for _ in 0..flashes {
            controls.render(view, FLASH_ON_REPEATS)?;
            controls.blank_for(FLASH_OFF_MS)?;
        }
        controls.wait_for_snooze_release()?;
        controls.clock.resume_refresh();
        Ok(Self::ShowTime.enter(controls.clock))
    }
}
