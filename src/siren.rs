//! Piezo buzzer driven push-pull from two output lines.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::Result;
use crate::constants::{BUZZER_LINE_COUNT, SIREN_CYCLES, SIREN_GAP_MS, SIREN_HALF_PERIOD_US};
use crate::output_array::OutputArray;

/// The buzzer. Line 0 and line 1 are driven in opposition to swing the piezo both ways.
pub struct Siren<O>(OutputArray<O, BUZZER_LINE_COUNT>);

impl<O: OutputPin> Siren<O> {
    pub const fn new(lines: OutputArray<O, BUZZER_LINE_COUNT>) -> Self {
        Self(lines)
    }

    /// Two tone bursts separated by a short gap. Blocks for about 650 ms.
    ///
    /// # Errors
    ///
    /// Returns an error if a buzzer line cannot be driven.
    pub fn sound(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        self.burst(delay)?;
        delay.delay_ms(SIREN_GAP_MS);
        self.burst(delay)
    }

    fn burst(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        for _ in 0..SIREN_CYCLES {
            self.drive(PinState::Low, PinState::High)?;
            delay.delay_us(SIREN_HALF_PERIOD_US);
            self.drive(PinState::High, PinState::Low)?;
            delay.delay_us(SIREN_HALF_PERIOD_US);
        }
        self.silence()
    }

    fn drive(&mut self, first: PinState, second: PinState) -> Result<()> {
        self.0.set_level_at_index(0, first)?;
        self.0.set_level_at_index(1, second)
    }

    /// Both lines low so no current flows through the piezo.
    ///
    /// # Errors
    ///
    /// Returns an error if a buzzer line cannot be driven.
    pub fn silence(&mut self) -> Result<()> {
        self.0.set_all(PinState::Low)
    }
}
