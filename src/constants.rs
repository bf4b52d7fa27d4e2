//! Timing, brightness, and gesture constants for the alarm clock.

use embedded_hal::digital::PinState;

/// The number of digit cells on the display.
pub const CELL_COUNT: usize = 4;

/// The number of multiplexed positions: four digits plus the colon/indicator slot.
pub const POSITION_COUNT: usize = CELL_COUNT + 1;

/// The number of segment lines: seven segments plus the decimal point.
pub const SEGMENT_COUNT: usize = 8;

/// The number of buzzer drive lines.
pub const BUZZER_LINE_COUNT: usize = 2;

/// Per-position dwell in microseconds at normal brightness.
pub const BRIGHT_DWELL_US: u32 = 50;

/// Per-position dwell in microseconds at night brightness.
pub const DIM_DWELL_US: u32 = 1;

/// Morning hours before this one (and midnight) are dimmed.
pub const DIM_BEFORE_HOUR: u8 = 7;

/// Evening hours after this one (except noon) are dimmed.
pub const BRIGHT_AFTER_HOUR: u8 = 7;

/// How long a button combination must be held before the second, confirming read.
pub const HOLD_CONFIRM_MS: u32 = 2000;

/// Minutes added to the current time when snoozing.
pub const SNOOZE_MINUTES: u8 = 9;

/// Out-of-range field value that keeps an inactive snooze target from ever matching.
pub const SENTINEL_FIELD: u8 = 88;

/// Consecutive presses of one button before the minute step grows.
pub const RAMP_HELD_THRESHOLD: u8 = 5;

/// Largest minute step reached while ramping.
pub const RAMP_MAX_STEP: u8 = 30;

/// Digit cycles per live refresh pass.
pub const LIVE_REPEATS: u16 = 10;

/// Live refresh passes between scroll steps of the spoken time.
pub const SCROLL_PASSES: u8 = 10;

/// Digit cycles the alarm time is held on screen while the snooze button is first held.
pub const PROMPT_REPEATS: u16 = 2000;

/// Digit cycles rendered per iteration of a Set-mode editor.
pub const EDIT_REPEATS: u16 = 100;

/// Digit cycles rendered while waiting for Up and Down to be released on entering Set-Time.
pub const ENTRY_REPEATS: u16 = 1000;

/// Digit cycles for the "on" half of a confirmation flash.
pub const FLASH_ON_REPEATS: u16 = 250;

/// Blank time for the "off" half of a confirmation flash.
pub const FLASH_OFF_MS: u32 = 250;

/// Confirmation flashes when leaving Set-Time.
pub const SET_TIME_FLASHES: u8 = 3;

/// Confirmation flashes when leaving Set-Alarm.
pub const SET_ALARM_FLASHES: u8 = 4;

/// Poll interval while waiting for a button to be let go.
pub const RELEASE_POLL_MS: u32 = 10;

/// Blank time closing each cycle of the alarm-time view.
pub const ALARM_VIEW_BLANK_MS: u32 = 1;

/// Full tone periods in each siren burst.
pub const SIREN_CYCLES: u16 = 500;

/// Half-period of the siren tone in microseconds.
pub const SIREN_HALF_PERIOD_US: u32 = 300;

/// Silence between the two siren bursts.
pub const SIREN_GAP_MS: u32 = 50;

/// Period of the display refresh timer.
pub const REFRESH_PERIOD_MS: u64 = 16;

/// Period of the time-of-day timer.
pub const TICK_PERIOD_MS: u64 = 1000;

/// Input level at which the alarm slide switch is engaged.
pub const SWITCH_ENGAGED_LEVEL: PinState = PinState::High;
