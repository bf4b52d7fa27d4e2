use embassy_rp::gpio::{Input, Level, Output, Pull};

use crate::buttons::{AlarmSwitch, Buttons};
use crate::constants::{BUZZER_LINE_COUNT, POSITION_COUNT, SEGMENT_COUNT};
use crate::output_array::OutputArray;

/// The ClockIt board's lines on a Pico.
///
/// | Lines          | GPIO        | Idle level            |
/// |----------------|-------------|-----------------------|
/// | positions 1-5  | 1-5         | high (deselected)     |
/// | segments A-DP  | 6-13        | low (dark)            |
/// | buzzer         | 14, 15      | low                   |
/// | up/down/snooze | 16, 17, 18  | pull-up, pressed low  |
/// | alarm switch   | 19          | pull-up, engaged high |
pub struct Hardware {
    pub positions: OutputArray<Output<'static>, POSITION_COUNT>,
    pub segments: OutputArray<Output<'static>, SEGMENT_COUNT>,
    pub buzzer: OutputArray<Output<'static>, BUZZER_LINE_COUNT>,
    pub buttons: Buttons<Input<'static>>,
    pub switch: AlarmSwitch<Input<'static>>,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let positions = OutputArray::new([
            Output::new(peripherals.PIN_1, Level::High),
            Output::new(peripherals.PIN_2, Level::High),
            Output::new(peripherals.PIN_3, Level::High),
            Output::new(peripherals.PIN_4, Level::High),
            Output::new(peripherals.PIN_5, Level::High),
        ]);

        let segments = OutputArray::new([
            Output::new(peripherals.PIN_6, Level::Low),
            Output::new(peripherals.PIN_7, Level::Low),
            Output::new(peripherals.PIN_8, Level::Low),
            Output::new(peripherals.PIN_9, Level::Low),
            Output::new(peripherals.PIN_10, Level::Low),
            Output::new(peripherals.PIN_11, Level::Low),
            Output::new(peripherals.PIN_12, Level::Low),
            Output::new(peripherals.PIN_13, Level::Low),
        ]);

        let buzzer = OutputArray::new([
            Output::new(peripherals.PIN_14, Level::Low),
            Output::new(peripherals.PIN_15, Level::Low),
        ]);

        let buttons = Buttons::new(
            Input::new(peripherals.PIN_16, Pull::Up),
            Input::new(peripherals.PIN_17, Pull::Up),
            Input::new(peripherals.PIN_18, Pull::Up),
        );
        let switch = AlarmSwitch::new(Input::new(peripherals.PIN_19, Pull::Up));

        Self {
            positions,
            segments,
            buzzer,
            buttons,
            switch,
        }
    }
}
