//! Firmware core for the ClockIt alarm clock: a four-digit multiplexed display, a buzzer,
//! three buttons, and an alarm switch.
//!
//! The library is hardware-agnostic (embedded-hal 1.0 pins and delays). The `pico1` feature
//! adds [`Hardware`] for a Raspberry Pi Pico wired to the ClockIt board.
#![cfg_attr(not(test), no_std)]

pub mod buttons;
pub mod clock_state;
pub mod constants;
pub mod display;
mod error;
pub mod foreground;
#[cfg(feature = "pico1")]
mod hardware;
mod never;
pub mod output_array;
pub mod segment;
pub mod siren;
pub mod spoken_time;
pub mod time_of_day;

// Re-export commonly used items
pub use buttons::{AlarmSwitch, ButtonLevels, Buttons};
pub use clock_state::{AlarmEvent, AlarmState, ClockState, ClockStatic, DisplayMode, Frame, ProgramMode};
pub use display::{Panel, SharedPanel, refresh_if_enabled, with_panel};
pub use error::{Error, Result};
pub use foreground::Foreground;
pub use foreground::state::{MinuteRamp, ProgramState};
#[cfg(feature = "pico1")]
pub use hardware::Hardware;
pub use never::Never;
pub use output_array::OutputArray;
pub use segment::Leds;
pub use siren::Siren;
pub use spoken_time::SpokenTime;
pub use time_of_day::{Brightness, Direction, Meridiem, TimeOfDay};
