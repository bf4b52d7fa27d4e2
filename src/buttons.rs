//! The three push buttons and the alarm slide switch.

use embedded_hal::digital::{InputPin, PinState};

use crate::Result;
use crate::constants::SWITCH_ENGAGED_LEVEL;
use crate::error::Error::CannotReadInput;
use crate::time_of_day::Direction;

/// One read of the three buttons.
///
/// Buttons are wired to ground with pull-ups, so a pressed button reads low.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLevels {
    pub up: bool,
    pub down: bool,
    pub snooze: bool,
}

impl ButtonLevels {
    #[must_use]
    pub const fn up_and_down(&self) -> bool {
        self.up && self.down
    }

    #[must_use]
    pub const fn down_and_snooze(&self) -> bool {
        self.down && self.snooze
    }

    /// The adjustment asked for while editing. Up wins when both are pressed.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Input lines for the Up, Down, and Snooze buttons.
pub struct Buttons<I> {
    up: I,
    down: I,
    snooze: I,
}

impl<I: InputPin> Buttons<I> {
    pub const fn new(up: I, down: I, snooze: I) -> Self {
        Self { up, down, snooze }
    }

    /// Samples all three lines once.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be read.
    pub fn read(&mut self) -> Result<ButtonLevels> {
        Ok(ButtonLevels {
            up: is_pressed(&mut self.up)?,
            down: is_pressed(&mut self.down)?,
            snooze: is_pressed(&mut self.snooze)?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the Snooze line cannot be read.
    pub fn snooze_pressed(&mut self) -> Result<bool> {
        is_pressed(&mut self.snooze)
    }
}

fn is_pressed(line: &mut impl InputPin) -> Result<bool> {
    line.is_low().map_err(|_| CannotReadInput)
}

/// The alarm slide switch.
///
/// It is read by the display on every digit cycle, so turning it off silences a ringing
/// alarm within one cycle, whatever the foreground is doing.
pub struct AlarmSwitch<I>(I);

impl<I: InputPin> AlarmSwitch<I> {
    pub const fn new(line: I) -> Self {
        Self(line)
    }

    /// # Errors
    ///
    /// Returns an error if the switch line cannot be read.
    pub fn engaged(&mut self) -> Result<bool> {
        let level = match SWITCH_ENGAGED_LEVEL {
            PinState::High => self.0.is_high(),
            PinState::Low => self.0.is_low(),
        };
        level.map_err(|_| CannotReadInput)
    }
}
