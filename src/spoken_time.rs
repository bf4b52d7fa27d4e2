//! The time of day spelled out in words, padded for scrolling across four digits.

use heapless::String;

use crate::Result;
use crate::constants::CELL_COUNT;
use crate::error::Error::SpokenTimeOverflow;
use crate::time_of_day::{Meridiem, TimeOfDay};

/// Longest text is 30 characters, e.g. `"    Twelve Twenty-Seven AM    "`.
pub const SPOKEN_TIME_CAPACITY: usize = 32;

/// Blank padding so the text scrolls in from, and out to, an empty display.
const PADDING: &str = "    ";

const NUMBERS: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 6] = ["Oh", "Ten", "Twenty", "Thirty", "Forty", "Fifty"];

/// Text such as `"    Ten Oh-Five PM    "`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpokenTime(String<SPOKEN_TIME_CAPACITY>);

impl SpokenTime {
    /// An empty text, usable in `const` contexts before the first time is spelled out.
    #[must_use]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Spells out `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpokenTimeOverflow`](crate::Error::SpokenTimeOverflow) if a field is
    /// out of range and the words would not fit.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting minutes into tens and ones"
    )]
    pub fn from_time(time: &TimeOfDay) -> Result<Self> {
        let mut text = String::new();
        text.push_str(PADDING)?;
        text.push_str(number_word(time.hours)?)?;
        text.push(' ')?;

        match time.minutes {
            0 => text.push_str("O'Clock")?,
            10..=19 => text.push_str(number_word(time.minutes)?)?,
            minutes => {
                let tens = TENS
                    .get(usize::from(minutes / 10))
                    .copied()
                    .ok_or(SpokenTimeOverflow)?;
                text.push_str(tens)?;
                let ones = minutes % 10;
                if ones != 0 {
                    text.push('-')?;
                    text.push_str(number_word(ones)?)?;
                }
            }
        }

        text.push_str(match time.meridiem {
            Meridiem::Am => " AM",
            Meridiem::Pm => " PM",
        })?;
        text.push_str(PADDING)?;
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The four characters starting at `start`, blank past the end.
    #[must_use]
    pub fn window(&self, start: usize) -> [char; CELL_COUNT] {
        let mut window = [' '; CELL_COUNT];
        let bytes = self.0.as_bytes().iter().skip(start);
        for (slot, &byte) in window.iter_mut().zip(bytes) {
            *slot = char::from(byte);
        }
        window
    }
}

fn number_word(value: u8) -> Result<&'static str> {
    NUMBERS
        .get(usize::from(value))
        .copied()
        .ok_or(SpokenTimeOverflow)
}
