//! Shared test infrastructure: a simulated ClockIt board on one virtual clock.

#![allow(dead_code, reason = "Each test file uses a different subset")]

use std::cell::RefCell;
use std::convert::Infallible;
use std::ops::Range;
use std::rc::Rc;

use clockit::constants::{BUZZER_LINE_COUNT, POSITION_COUNT, SEGMENT_COUNT};
use clockit::{
    AlarmSwitch, Buttons, ClockStatic, Foreground, OutputArray, Panel, SharedPanel, Siren,
};
use embassy_sync::mutex::Mutex;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

// ============================================================================
// Board
// ============================================================================

const SEGMENT_BASE: usize = POSITION_COUNT;
const BUZZER_BASE: usize = SEGMENT_BASE + SEGMENT_COUNT;
const LINE_COUNT: usize = BUZZER_BASE + BUZZER_LINE_COUNT;

pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// An input line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Up,
    Down,
    Snooze,
    Switch,
}

impl Line {
    const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Snooze => 2,
            Self::Switch => 3,
        }
    }

    // Buttons pull low when pressed; the switch reads high when engaged.
    const fn active_level(self) -> bool {
        matches!(self, Self::Switch)
    }
}

/// One dwell with a single position selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lit {
    pub position: usize,
    pub segments: u8,
    pub duration_ns: u64,
}

#[derive(Default)]
struct Board {
    now_ns: u64,
    outputs: [bool; LINE_COUNT],
    active: [Vec<Range<u64>>; 4],
    lit: Vec<Lit>,
    overlaps: usize,
    buzzer_rising: [usize; BUZZER_LINE_COUNT],
}

impl Board {
    fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.outputs[..POSITION_COUNT]
            .iter()
            .enumerate()
            .filter(|(_, high)| !**high)
            .map(|(position, _)| position)
    }

    fn segments(&self) -> u8 {
        self.outputs[SEGMENT_BASE..BUZZER_BASE]
            .iter()
            .enumerate()
            .fold(0, |bits, (bit, &high)| if high { bits | (1 << bit) } else { bits })
    }

    fn advance(&mut self, ns: u64) {
        let selected: Vec<usize> = self.selected().collect();
        match selected.as_slice() {
            [] => {}
            [position] => {
                let lit = Lit {
                    position: *position,
                    segments: self.segments(),
                    duration_ns: ns,
                };
                self.lit.push(lit);
            }
            _ => self.overlaps += 1,
        }
        self.now_ns += ns;
    }

    fn is_active(&self, line: Line) -> bool {
        self.active[line.index()]
            .iter()
            .any(|range| range.contains(&self.now_ns))
    }
}

/// Handle to the simulated board. Clones share the same board.
#[derive(Clone)]
pub struct SimBoard(Rc<RefCell<Board>>);

impl SimBoard {
    /// A board at time zero with every position deselected.
    pub fn new() -> Self {
        let mut board = Board::default();
        board.outputs[..POSITION_COUNT].fill(true);
        Self(Rc::new(RefCell::new(board)))
    }

    pub fn now_ms(&self) -> u64 {
        self.0.borrow().now_ns / NANOS_PER_MILLI
    }

    /// Activates `line` for `ms` (relative to now).
    pub fn press(&self, line: Line, ms: Range<u64>) {
        let now = self.0.borrow().now_ns;
        let range = (now + ms.start * NANOS_PER_MILLI)..(now + ms.end * NANOS_PER_MILLI);
        self.0.borrow_mut().active[line.index()].push(range);
    }

    /// Activates `line` from now until [`SimBoard::release`].
    pub fn hold(&self, line: Line) {
        let now = self.0.borrow().now_ns;
        self.0.borrow_mut().active[line.index()].push(now..u64::MAX);
    }

    pub fn release(&self, line: Line) {
        let mut board = self.0.borrow_mut();
        let now = board.now_ns;
        for range in &mut board.active[line.index()] {
            range.end = range.end.min(now);
        }
    }

    pub fn take_lit(&self) -> Vec<Lit> {
        std::mem::take(&mut self.0.borrow_mut().lit)
    }

    /// `(position, segments)` for every recorded dwell.
    pub fn take_frames(&self) -> Vec<(usize, u8)> {
        self.take_lit()
            .into_iter()
            .map(|lit| (lit.position, lit.segments))
            .collect()
    }

    pub fn overlaps(&self) -> usize {
        self.0.borrow().overlaps
    }

    pub fn buzzer_rising(&self) -> [usize; BUZZER_LINE_COUNT] {
        self.0.borrow().buzzer_rising
    }

    pub fn buzzer_levels(&self) -> [bool; BUZZER_LINE_COUNT] {
        let board = self.0.borrow();
        [board.outputs[BUZZER_BASE], board.outputs[BUZZER_BASE + 1]]
    }

    pub fn output(&self, line: usize) -> SimOutput {
        SimOutput {
            board: self.clone(),
            line,
        }
    }

    pub fn input(&self, line: Line) -> SimInput {
        SimInput {
            board: self.clone(),
            line,
        }
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay(self.clone())
    }

    pub fn panel(&self) -> SharedPanel<SimOutput, SimInput, SimDelay> {
        let positions = OutputArray::new(std::array::from_fn(|index| self.output(index)));
        let segments =
            OutputArray::new(std::array::from_fn(|index| self.output(SEGMENT_BASE + index)));
        let buzzer =
            OutputArray::new(std::array::from_fn(|index| self.output(BUZZER_BASE + index)));
        let switch = AlarmSwitch::new(self.input(Line::Switch));
        Mutex::new(Panel::new(
            positions,
            segments,
            Siren::new(buzzer),
            switch,
            self.delay(),
        ))
    }

    pub fn buttons(&self) -> Buttons<SimInput> {
        Buttons::new(
            self.input(Line::Up),
            self.input(Line::Down),
            self.input(Line::Snooze),
        )
    }

    pub fn foreground<'a>(
        &self,
        clock: &'a ClockStatic,
        panel: &'a SharedPanel<SimOutput, SimInput, SimDelay>,
    ) -> Foreground<'a, SimOutput, SimInput, SimDelay> {
        Foreground::new(clock, panel, self.buttons(), self.delay())
    }
}

/// A booted clock.
pub fn booted_clock() -> ClockStatic {
    let clock = ClockStatic::new_static();
    clock.boot().expect("boot time is valid");
    clock
}

// ============================================================================
// Pins and delay
// ============================================================================

pub struct SimOutput {
    board: SimBoard,
    line: usize,
}

impl ErrorType for SimOutput {
    type Error = Infallible;
}

impl SimOutput {
    fn set(&mut self, high: bool) {
        let mut board = self.board.0.borrow_mut();
        if let Some(buzzer) = self.line.checked_sub(BUZZER_BASE) {
            if high && !board.outputs[self.line] {
                board.buzzer_rising[buzzer] += 1;
            }
        }
        board.outputs[self.line] = high;
    }
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

pub struct SimInput {
    board: SimBoard,
    line: Line,
}

impl ErrorType for SimInput {
    type Error = Infallible;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let active = self.board.0.borrow().is_active(self.line);
        Ok(active == self.line.active_level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

/// Busy-wait that advances the virtual clock, recording what the display showed meanwhile.
#[derive(Clone)]
pub struct SimDelay(SimBoard);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.0.borrow_mut().advance(u64::from(ns));
    }
}
