//! Twelve-hour time of day with the ClockIt rollover rules.

use crate::constants::{
    BRIGHT_AFTER_HOUR, BRIGHT_DWELL_US, DIM_BEFORE_HOUR, DIM_DWELL_US, SENTINEL_FIELD,
};

/// Half of the day.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

/// Which way an Up or Down press moves the minutes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Hours `1..=12`, minutes and seconds `0..=59`, and AM/PM.
///
/// The wall clock, the alarm, and the snooze target all share this shape. Two times match
/// when every field is equal.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub meridiem: Meridiem,
}

impl TimeOfDay {
    /// A time no clock can reach. Used as the snooze target while snooze is inactive.
    pub const SENTINEL: Self = Self::new(SENTINEL_FIELD, SENTINEL_FIELD, SENTINEL_FIELD, Meridiem::Am);

    #[must_use]
    pub const fn new(hours: u8, minutes: u8, seconds: u8, meridiem: Meridiem) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            meridiem,
        }
    }

    /// Advances one second, cascading into minutes, hours, and AM/PM.
    ///
    /// Returns `true` when the minute changed.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Fields stay below 60 so increments cannot overflow"
    )]
    pub fn advance_second(&mut self) -> bool {
        self.seconds += 1;
        if self.seconds < 60 {
            return false;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes >= 60 {
            self.minutes = 0;
            self.next_hour();
        }
        true
    }

    /// Moves the minutes by `step` (at most 59) in `direction`, borrowing from or carrying into
    /// the hour.
    pub fn adjust_minutes(&mut self, direction: Direction, step: u8) {
        match direction {
            Direction::Up => self.add_minutes(step),
            Direction::Down => self.sub_minutes(step),
        }
    }

    /// Adds `step` (at most 59) minutes. Seconds are untouched.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "minutes < 60 and step < 60 keep the sum below 120"
    )]
    pub fn add_minutes(&mut self, step: u8) {
        self.minutes += step;
        if self.minutes >= 60 {
            self.minutes -= 60;
            self.next_hour();
        }
    }

    /// Subtracts `step` (at most 59) minutes. Seconds are untouched.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The bounds check runs before each subtraction"
    )]
    pub fn sub_minutes(&mut self, step: u8) {
        if self.minutes >= step {
            self.minutes -= step;
        } else {
            self.minutes = self.minutes + 60 - step;
            self.previous_hour();
        }
    }

    /// The time `minutes` (at most 59) from now, keeping the seconds.
    #[must_use]
    pub fn plus_minutes(self, minutes: u8) -> Self {
        let mut later = self;
        later.add_minutes(minutes);
        later
    }

    #[expect(clippy::arithmetic_side_effects, reason = "hours <= 12")]
    fn next_hour(&mut self) {
        self.hours += 1;
        if self.hours == 12 {
            self.meridiem = self.meridiem.flipped();
        }
        if self.hours == 13 {
            self.hours = 1;
        }
    }

    #[expect(clippy::arithmetic_side_effects, reason = "hours >= 1")]
    fn previous_hour(&mut self) {
        self.hours -= 1;
        if self.hours == 0 {
            self.hours = 12;
        }
        if self.hours == 11 {
            self.meridiem = self.meridiem.flipped();
        }
    }

    /// Tens digit of the hour, or `None` when it is not shown (hours 1-9).
    #[must_use]
    #[expect(clippy::integer_division_remainder_used, reason = "Digit extraction")]
    pub const fn hours_tens(&self) -> Option<u8> {
        if self.hours > 9 {
            Some(self.hours / 10)
        } else {
            None
        }
    }

    #[must_use]
    #[expect(clippy::integer_division_remainder_used, reason = "Digit extraction")]
    pub const fn hours_ones(&self) -> u8 {
        self.hours % 10
    }

    #[must_use]
    #[expect(clippy::integer_division_remainder_used, reason = "Digit extraction")]
    pub const fn minutes_tens(&self) -> u8 {
        self.minutes / 10
    }

    #[must_use]
    #[expect(clippy::integer_division_remainder_used, reason = "Digit extraction")]
    pub const fn minutes_ones(&self) -> u8 {
        self.minutes % 10
    }
}

/// Display brightness, realized as the per-position dwell time.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Brightness {
    #[default]
    Bright,
    Dim,
}

impl Brightness {
    /// Night dimming: before 7 AM (midnight included) and after 7 PM (noon excluded).
    #[must_use]
    pub const fn for_time(time: &TimeOfDay) -> Self {
        let hours = time.hours;
        let dim = match time.meridiem {
            Meridiem::Am => hours < DIM_BEFORE_HOUR || hours == 12,
            Meridiem::Pm => hours > BRIGHT_AFTER_HOUR && hours != 12,
        };
        if dim { Self::Dim } else { Self::Bright }
    }

    #[must_use]
    pub const fn dwell_us(self) -> u32 {
        match self {
            Self::Bright => BRIGHT_DWELL_US,
            Self::Dim => DIM_DWELL_US,
        }
    }
}
