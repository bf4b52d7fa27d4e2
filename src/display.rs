//! The multiplexed four-digit display, with the buzzer that rings between passes.
//!
//! Five positions share eight segment lines: digits 1-4 and the indicator slot, whose
//! segment lines feed the colon (A and B) and the AM dot (C). A position is selected by
//! driving its line low; a segment is lit by driving its line high. Only one position is
//! ever selected, for one dwell, with every output blanked in between so the previous
//! digit cannot bleed into the next.
//!
//! The panel also owns the alarm switch. Each digit cycle starts by applying the switch to
//! the alarm, so a ringing alarm goes quiet as soon as the switch is turned off, even while
//! the foreground is busy with a long blocking render.
//!
//! The dwell length is the brightness: see [`Brightness::dwell_us`](crate::time_of_day::Brightness::dwell_us).

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::Result;
use crate::buttons::AlarmSwitch;
use crate::clock_state::{ClockStatic, Frame, ProgramMode};
use crate::constants::{ALARM_VIEW_BLANK_MS, CELL_COUNT, LIVE_REPEATS, POSITION_COUNT, SEGMENT_COUNT};
use crate::output_array::OutputArray;
use crate::segment::Leds;
use crate::siren::Siren;
use crate::time_of_day::{Meridiem, TimeOfDay};

/// Index of the colon/indicator slot among the positions.
pub const INDICATOR: usize = CELL_COUNT;

/// Index of the digit that carries the alarm-armed dot.
pub const ALARM_DOT_DIGIT: usize = CELL_COUNT - 1;

/// The display shared between the refresh task and the foreground loop.
///
/// The refresh task only ever [`try_lock`](Mutex::try_lock)s it and skips the pass when it is
/// busy; the foreground takes it with [`with_panel`] after suspending the refresh.
pub type SharedPanel<O, I, D> = Mutex<CriticalSectionRawMutex, Panel<O, I, D>>;

/// Position and segment lines, the buzzer, the alarm switch, and the busy-wait used for
/// dwell and tone timing.
pub struct Panel<O, I, D> {
    positions: OutputArray<O, POSITION_COUNT>,
    segments: OutputArray<O, SEGMENT_COUNT>,
    siren: Siren<O>,
    switch: AlarmSwitch<I>,
    delay: D,
}

impl<O: OutputPin, I: InputPin, D: DelayNs> Panel<O, I, D> {
    pub const fn new(
        positions: OutputArray<O, POSITION_COUNT>,
        segments: OutputArray<O, SEGMENT_COUNT>,
        siren: Siren<O>,
        switch: AlarmSwitch<I>,
        delay: D,
    ) -> Self {
        Self {
            positions,
            segments,
            siren,
            switch,
            delay,
        }
    }

    /// Reads the alarm switch and applies it to the alarm: arming, starting, or silencing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch line cannot be read.
    pub fn sync_alarm(&mut self, clock: &ClockStatic) -> Result<()> {
        let engaged = self.switch.engaged()?;
        clock.evaluate_alarm(engaged);
        Ok(())
    }

    /// Deselects every position and darkens every segment.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn clear(&mut self) -> Result<()> {
        self.positions.set_all(PinState::High)?;
        self.segments.set_all(PinState::Low)
    }

    /// Blank display for `ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn blank_for(&mut self, ms: u32) -> Result<()> {
        self.clear()?;
        self.delay.delay_ms(ms);
        Ok(())
    }

    /// Blanks the display and sounds the siren.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn sound_siren(&mut self) -> Result<()> {
        self.clear()?;
        self.siren.sound(&mut self.delay)
    }

    /// One live pass: the scrolling text in Show-Time when text mode is on, the numeric
    /// clock otherwise. Counts the pass toward the next scroll step.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn refresh(&mut self, clock: &ClockStatic) -> Result<()> {
        let frame = clock.frame();
        #[cfg(feature = "display-trace")]
        defmt::info!("refresh: {}", frame);
        if frame.shows_text() {
            self.render_text(clock, LIVE_REPEATS)?;
        } else {
            self.render_time(clock, LIVE_REPEATS)?;
        }
        clock.advance_scroll();
        Ok(())
    }

    /// Shows the wall clock for `time_on` digit cycles.
    ///
    /// The hour's tens digit is dropped for hours 1-9. The colon blinks with the seconds in
    /// Show-Time and is solid in every other mode. Ringing sounds the siren once per second.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn render_time(&mut self, clock: &ClockStatic, time_on: u16) -> Result<()> {
        for _ in 0..time_on {
            self.sync_alarm(clock)?;
            let frame = clock.frame();
            let dwell_us = frame.dwell_us();
            self.show_time_of_day(&frame.clock.time, dwell_us)?;
            let colon = if !frame.clock.blink && frame.program_mode == ProgramMode::ShowTime {
                Leds::BLANK
            } else {
                Leds::COLON
            };
            self.show(INDICATOR, colon, dwell_us)?;
            self.finish_live_cycle(clock, &frame)?;
        }
        Ok(())
    }

    /// Shows the four characters under the scroll cursor for `time_on` digit cycles.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn render_text(&mut self, clock: &ClockStatic, time_on: u16) -> Result<()> {
        for _ in 0..time_on {
            self.sync_alarm(clock)?;
            let frame = clock.frame();
            let dwell_us = frame.dwell_us();
            for (position, &character) in frame.text.iter().enumerate() {
                self.show(position, Leds::character(character), dwell_us)?;
            }
            self.finish_live_cycle(clock, &frame)?;
        }
        Ok(())
    }

    /// Shows the alarm time with a solid colon for `time_on` digit cycles. No alarm dot and
    /// no siren.
    ///
    /// # Errors
    ///
    /// Returns an error if an output line cannot be driven.
    pub fn render_alarm(&mut self, clock: &ClockStatic, time_on: u16) -> Result<()> {
        for _ in 0..time_on {
            self.sync_alarm(clock)?;
            let frame = clock.frame();
            let dwell_us = frame.dwell_us();
            self.show_time_of_day(&frame.alarm, dwell_us)?;
            self.show(INDICATOR, Leds::COLON, dwell_us)?;
            self.blank_for(ALARM_VIEW_BLANK_MS)?;
        }
        Ok(())
    }

    fn show_time_of_day(&mut self, time: &TimeOfDay, dwell_us: u32) -> Result<()> {
        if let Some(tens) = time.hours_tens() {
            self.show(0, Leds::digit(tens), dwell_us)?;
        }
        self.show(1, Leds::digit(time.hours_ones()), dwell_us)?;
        self.show(2, Leds::digit(time.minutes_tens()), dwell_us)?;
        self.show(3, Leds::digit(time.minutes_ones()), dwell_us)?;
        if time.meridiem == Meridiem::Am {
            self.show(INDICATOR, Leds::AM_DOT, dwell_us)?;
        }
        Ok(())
    }

    // Alarm dot while armed, the siren when a ringing second is due, then a dark dwell.
    fn finish_live_cycle(&mut self, clock: &ClockStatic, frame: &Frame) -> Result<()> {
        let dwell_us = frame.dwell_us();
        if frame.alarm_state.armed {
            self.show(ALARM_DOT_DIGIT, Leds::ALARM_DOT, dwell_us)?;
            if frame.alarm_state.ringing && frame.buzz_due {
                self.sound_siren()?;
                clock.clear_buzz_due();
            }
        }
        self.clear()?;
        self.delay.delay_us(dwell_us);
        Ok(())
    }

    fn show(&mut self, position: usize, bits: u8, dwell_us: u32) -> Result<()> {
        self.clear()?;
        self.segments.set_from_bits(bits)?;
        self.positions.set_level_at_index(position, PinState::Low)?;
        self.delay.delay_us(dwell_us);
        Ok(())
    }
}

/// Runs one live pass unless the refresh is suspended or the foreground holds the panel.
///
/// Returns whether a pass was drawn.
///
/// # Errors
///
/// Returns an error if an output line cannot be driven.
pub fn refresh_if_enabled<O: OutputPin, I: InputPin, D: DelayNs>(
    panel: &SharedPanel<O, I, D>,
    clock: &ClockStatic,
) -> Result<bool> {
    if !clock.refresh_enabled() {
        return Ok(false);
    }
    let Ok(mut panel) = panel.try_lock() else {
        return Ok(false);
    };
    panel.refresh(clock)?;
    Ok(true)
}

/// Runs `f` with exclusive use of the panel, spinning until any pass in progress ends.
pub fn with_panel<O, I, D, R>(
    panel: &SharedPanel<O, I, D>,
    f: impl FnOnce(&mut Panel<O, I, D>) -> R,
) -> R {
    loop {
        if let Ok(mut panel) = panel.try_lock() {
            return f(&mut panel);
        }
        core::hint::spin_loop();
    }
}
