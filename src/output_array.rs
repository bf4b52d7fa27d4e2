use embedded_hal::digital::{OutputPin, PinState};

use crate::Result;
use crate::error::Error::{CannotSetOutputState, IndexOutOfBounds};

/// Array of GPIO output lines driven together: digit selects, segments, or buzzer drives.
///
/// See [`Panel`](crate::display::Panel) for how the arrays are wired.
pub struct OutputArray<O, const N: usize>([O; N]);

impl<O: OutputPin, const N: usize> OutputArray<O, N> {
    pub const fn new(outputs: [O; N]) -> Self {
        Self(outputs)
    }

    #[inline]
    pub(crate) fn set_level_at_index(&mut self, index: usize, level: PinState) -> Result<()> {
        self.get_mut(index)
            .ok_or(IndexOutOfBounds)?
            .set_state(level)
            .map_err(|_| CannotSetOutputState)
    }

    #[inline]
    pub(crate) fn set_all(&mut self, level: PinState) -> Result<()> {
        for output in &mut self.0 {
            output.set_state(level).map_err(|_| CannotSetOutputState)?;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut O> {
        self.0.get_mut(index)
    }
}

impl<O: OutputPin> OutputArray<O, { u8::BITS as usize }> {
    /// Drives line `n` high when bit `n` of `bits` is set.
    #[expect(clippy::shadow_reuse, reason = "Consuming the bits one at a time")]
    #[inline]
    pub(crate) fn set_from_bits(&mut self, bits: u8) -> Result<()> {
        let mut bits = bits;
        for output in &mut self.0 {
            let level: PinState = ((bits & 1) == 1).into();
            output.set_state(level).map_err(|_| CannotSetOutputState)?;
            bits >>= 1;
        }
        Ok(())
    }
}
