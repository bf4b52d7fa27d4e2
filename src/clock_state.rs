//! The clock's shared state: wall clock, alarm, snooze target, and display settings.
//!
//! [`ClockState`] holds the data and the rules (the once-a-second tick and the alarm/snooze
//! scheduler). [`ClockStatic`] puts it behind a critical-section mutex so the tick task, the
//! display refresh task, and the foreground loop can all reach it. Each call on
//! [`ClockStatic`] is one short critical section; the display works from a copied [`Frame`].

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use portable_atomic::{AtomicBool, Ordering};

use crate::Result;
use crate::constants::{CELL_COUNT, SCROLL_PASSES, SNOOZE_MINUTES};
use crate::spoken_time::SpokenTime;
use crate::time_of_day::{Brightness, Direction, Meridiem, TimeOfDay};

/// Time shown at power-up.
pub const BOOT_TIME: TimeOfDay = TimeOfDay::new(12, 0, 0, Meridiem::Pm);

/// Alarm time at power-up.
pub const BOOT_ALARM: TimeOfDay = TimeOfDay::new(10, 0, 0, Meridiem::Am);

/// The running time of day plus the blink flag that drives the seconds colon.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub time: TimeOfDay,
    pub blink: bool,
}

/// Alarm flags. `armed` mirrors the slide switch.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmState {
    pub armed: bool,
    pub ringing: bool,
    pub snooze_active: bool,
}

/// What the buttons currently edit. Published by the foreground state machine.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgramMode {
    #[default]
    ShowTime,
    SetTime,
    ShowAlarm,
    SetAlarm,
}

/// How the live display shows the time.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Numeric,
    ScrollingText,
}

impl DisplayMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Numeric => Self::ScrollingText,
            Self::ScrollingText => Self::Numeric,
        }
    }
}

/// Position of the four-character window in the spoken time, and how many live passes it
/// has been shown.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollCursor {
    pub index: usize,
    pub passes: u8,
}

impl ScrollCursor {
    /// Counts one live pass. Every [`SCROLL_PASSES`] passes the window moves one character,
    /// returning to the start once fewer than four characters remain.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "index is bounded by the text length and passes by SCROLL_PASSES"
    )]
    pub fn advance(&mut self, text_len: usize) {
        if self.passes < SCROLL_PASSES {
            self.passes += 1;
            return;
        }
        self.passes = 0;
        self.index += 1;
        if self.index + CELL_COUNT > text_len {
            self.index = 0;
        }
    }
}

/// What changed when the alarm was evaluated.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    Armed,
    Started,
    Disarmed,
}

/// A copy of everything one display cycle needs.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub clock: WallClock,
    pub alarm: TimeOfDay,
    pub alarm_state: AlarmState,
    pub program_mode: ProgramMode,
    pub display_mode: DisplayMode,
    pub brightness: Brightness,
    pub buzz_due: bool,
    pub text: [char; CELL_COUNT],
}

impl Frame {
    #[must_use]
    pub const fn dwell_us(&self) -> u32 {
        self.brightness.dwell_us()
    }

    /// The live view scrolls text only in Show-Time.
    #[must_use]
    pub fn shows_text(&self) -> bool {
        self.program_mode == ProgramMode::ShowTime
            && self.display_mode == DisplayMode::ScrollingText
    }
}

/// Everything the tick, the display, and the buttons share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    clock: WallClock,
    alarm: TimeOfDay,
    snooze_target: TimeOfDay,
    alarm_state: AlarmState,
    program_mode: ProgramMode,
    display_mode: DisplayMode,
    brightness: Brightness,
    spoken_time: SpokenTime,
    scroll: ScrollCursor,
    buzz_due: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    /// Power-up state. Call [`ClockState::boot`] before use to spell out the time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clock: WallClock {
                time: BOOT_TIME,
                blink: false,
            },
            alarm: BOOT_ALARM,
            snooze_target: TimeOfDay::SENTINEL,
            alarm_state: AlarmState {
                armed: false,
                ringing: false,
                snooze_active: false,
            },
            program_mode: ProgramMode::ShowTime,
            display_mode: DisplayMode::Numeric,
            brightness: Brightness::for_time(&BOOT_TIME),
            spoken_time: SpokenTime::new(),
            scroll: ScrollCursor {
                index: 0,
                passes: 0,
            },
            buzz_due: false,
        }
    }

    /// Spells out the current time and picks the brightness for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the current time is out of range.
    pub fn boot(&mut self) -> Result<()> {
        self.brightness = Brightness::for_time(&self.clock.time);
        self.refresh_spoken_time()
    }

    /// The once-a-second tick.
    ///
    /// Sets the buzz pulse, toggles the blink flag, and advances the clock. A new minute
    /// respells the time and rewinds the scroll. Brightness follows the hour except while the
    /// time is being set.
    ///
    /// # Errors
    ///
    /// Returns an error if the new time cannot be spelled out.
    pub fn on_second_tick(&mut self) -> Result<()> {
        self.buzz_due = true;
        self.clock.blink = !self.clock.blink;
        let minute_changed = self.clock.time.advance_second();
        if self.program_mode != ProgramMode::SetTime {
            self.brightness = Brightness::for_time(&self.clock.time);
        }
        if minute_changed {
            self.refresh_spoken_time()?;
        }
        Ok(())
    }

    /// Compares the clock against the alarm (or the snooze target while snoozing).
    ///
    /// A disengaged switch silences the alarm and cancels any snooze, whatever the time.
    pub fn evaluate_alarm(&mut self, switch_engaged: bool) -> Option<AlarmEvent> {
        let was_armed = self.alarm_state.armed;
        self.alarm_state.armed = switch_engaged;

        if !switch_engaged {
            self.alarm_state.ringing = false;
            self.on_switch_disengaged();
            return was_armed.then_some(AlarmEvent::Disarmed);
        }

        if !self.alarm_state.ringing && self.alarm_due() {
            self.alarm_state.ringing = true;
            return Some(AlarmEvent::Started);
        }

        (!was_armed).then_some(AlarmEvent::Armed)
    }

    fn alarm_due(&self) -> bool {
        if self.alarm_state.snooze_active {
            self.clock.time == self.snooze_target
        } else {
            self.clock.time == self.alarm
        }
    }

    /// Defers a ringing alarm by [`SNOOZE_MINUTES`]. Returns `false` (and changes nothing) if
    /// the alarm was not ringing.
    pub fn snooze(&mut self) -> bool {
        if !self.alarm_state.ringing {
            return false;
        }
        self.alarm_state.ringing = false;
        self.alarm_state.snooze_active = true;
        self.snooze_target = self.clock.time.plus_minutes(SNOOZE_MINUTES);
        true
    }

    /// Cancels any snooze and parks the target where no time can match it.
    pub const fn on_switch_disengaged(&mut self) {
        self.alarm_state.snooze_active = false;
        self.snooze_target = TimeOfDay::SENTINEL;
    }

    /// Moves the wall clock's minutes and respells the time.
    ///
    /// # Errors
    ///
    /// Returns an error if the new time cannot be spelled out.
    pub fn adjust_time(&mut self, direction: Direction, step: u8) -> Result<()> {
        self.clock.time.adjust_minutes(direction, step);
        self.refresh_spoken_time()
    }

    pub fn adjust_alarm(&mut self, direction: Direction, step: u8) {
        self.alarm.adjust_minutes(direction, step);
    }

    /// Replaces the wall clock time, keeping the blink flag.
    ///
    /// # Errors
    ///
    /// Returns an error if `time` cannot be spelled out.
    pub fn set_time(&mut self, time: TimeOfDay) -> Result<()> {
        self.clock.time = time;
        self.brightness = Brightness::for_time(&time);
        self.refresh_spoken_time()
    }

    pub const fn set_alarm(&mut self, alarm: TimeOfDay) {
        self.alarm = alarm;
    }

    fn refresh_spoken_time(&mut self) -> Result<()> {
        self.spoken_time = SpokenTime::from_time(&self.clock.time)?;
        self.scroll = ScrollCursor::default();
        Ok(())
    }

    pub const fn set_program_mode(&mut self, mode: ProgramMode) {
        self.program_mode = mode;
    }

    pub const fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.display_mode
    }

    pub const fn clear_buzz_due(&mut self) {
        self.buzz_due = false;
    }

    pub fn advance_scroll(&mut self) {
        self.scroll.advance(self.spoken_time.len());
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            clock: self.clock,
            alarm: self.alarm,
            alarm_state: self.alarm_state,
            program_mode: self.program_mode,
            display_mode: self.display_mode,
            brightness: self.brightness,
            buzz_due: self.buzz_due,
            text: self.spoken_time.window(self.scroll.index),
        }
    }

    #[must_use]
    pub const fn clock(&self) -> WallClock {
        self.clock
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.clock.time
    }

    #[must_use]
    pub const fn alarm(&self) -> TimeOfDay {
        self.alarm
    }

    #[must_use]
    pub const fn snooze_target(&self) -> TimeOfDay {
        self.snooze_target
    }

    #[must_use]
    pub const fn alarm_state(&self) -> AlarmState {
        self.alarm_state
    }

    #[must_use]
    pub const fn program_mode(&self) -> ProgramMode {
        self.program_mode
    }

    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    #[must_use]
    pub const fn spoken_time(&self) -> &SpokenTime {
        &self.spoken_time
    }

    #[must_use]
    pub const fn scroll(&self) -> ScrollCursor {
        self.scroll
    }

    #[must_use]
    pub const fn buzz_due(&self) -> bool {
        self.buzz_due
    }
}

/// Static resources shared by the tick task, the refresh task, and the foreground loop.
///
/// Create with [`ClockStatic::new_static`] in a `static`, then call [`ClockStatic::boot`].
pub struct ClockStatic {
    state: Mutex<CriticalSectionRawMutex, RefCell<ClockState>>,
    refresh_enabled: AtomicBool,
}

impl ClockStatic {
    #[must_use]
    pub const fn new_static() -> Self {
        Self {
            state: Mutex::new(RefCell::new(ClockState::new())),
            refresh_enabled: AtomicBool::new(true),
        }
    }

    /// # Errors
    ///
    /// See [`ClockState::boot`].
    pub fn boot(&self) -> Result<()> {
        self.with_state(ClockState::boot)?;
        #[cfg(feature = "defmt")]
        defmt::info!("ClockIt up: {}", self.frame());
        Ok(())
    }

    /// Runs `f` on the state inside one critical section.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ClockState) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// # Errors
    ///
    /// See [`ClockState::on_second_tick`].
    pub fn on_second_tick(&self) -> Result<()> {
        self.with_state(ClockState::on_second_tick)
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        self.with_state(|state| state.frame())
    }

    pub fn evaluate_alarm(&self, switch_engaged: bool) -> Option<AlarmEvent> {
        let event = self.with_state(|state| state.evaluate_alarm(switch_engaged));
        #[cfg(feature = "defmt")]
        if let Some(event) = event {
            defmt::info!("Alarm {}", event);
        }
        event
    }

    pub fn snooze(&self) -> bool {
        let snoozed = self.with_state(ClockState::snooze);
        #[cfg(feature = "defmt")]
        if snoozed {
            defmt::info!("Snoozing until {}", self.with_state(|state| state.snooze_target()));
        }
        snoozed
    }

    /// # Errors
    ///
    /// See [`ClockState::adjust_time`].
    pub fn adjust_time(&self, direction: Direction, step: u8) -> Result<()> {
        self.with_state(|state| state.adjust_time(direction, step))
    }

    pub fn adjust_alarm(&self, direction: Direction, step: u8) {
        self.with_state(|state| state.adjust_alarm(direction, step));
    }

    pub fn toggle_display_mode(&self) -> DisplayMode {
        let display_mode = self.with_state(ClockState::toggle_display_mode);
        #[cfg(feature = "defmt")]
        defmt::info!("Display mode: {}", display_mode);
        display_mode
    }

    pub fn set_program_mode(&self, mode: ProgramMode) {
        self.with_state(|state| state.set_program_mode(mode));
        #[cfg(feature = "defmt")]
        defmt::info!("Program mode: {}", mode);
    }

    pub fn clear_buzz_due(&self) {
        self.with_state(ClockState::clear_buzz_due);
    }

    pub fn advance_scroll(&self) {
        self.with_state(ClockState::advance_scroll);
    }

    #[must_use]
    pub fn is_ringing(&self) -> bool {
        self.with_state(|state| state.alarm_state().ringing)
    }

    /// Stops the periodic refresh from drawing until [`ClockStatic::resume_refresh`].
    pub fn suspend_refresh(&self) {
        self.refresh_enabled.store(false, Ordering::Release);
    }

    pub fn resume_refresh(&self) {
        self.refresh_enabled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn refresh_enabled(&self) -> bool {
        self.refresh_enabled.load(Ordering::Acquire)
    }
}
