//! Host-level tests for the multiplexed display and the siren, on a simulated board.

mod common;

use clockit::constants::{
    BRIGHT_DWELL_US, DIM_DWELL_US, LIVE_REPEATS, SCROLL_PASSES, SIREN_CYCLES,
};
use clockit::{Leds, Meridiem, ProgramMode, TimeOfDay, refresh_if_enabled, with_panel};
use common::{Line, SimBoard, booted_clock};

const INDICATOR: usize = 4;

fn digit(value: u8) -> u8 {
    Leds::digit(value)
}

#[test]
fn numeric_pm_time() {
    let board = SimBoard::new();
    let clock = booted_clock();
    let panel = board.panel();

    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");

    // 12:00 PM, blink clear in Show-Time: colon dark.
    assert_eq!(
        board.take_frames(),
        [
            (0, digit(1)),
            (1, digit(2)),
            (2, digit(0)),
            (3, digit(0)),
            (INDICATOR, Leds::BLANK),
        ]
    );
    assert_eq!(board.overlaps(), 0);
}

#[test]
fn numeric_am_time_drops_leading_zero() {
    let board = SimBoard::new();
    let clock = booted_clock();
    clock
        .with_state(|state| state.set_time(TimeOfDay::new(9, 5, 0, Meridiem::Am)))
        .expect("valid time");
    clock.on_second_tick().expect("valid time");
    let panel = board.panel();

    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");

    // Blink now set: colon lit.
    assert_eq!(
        board.take_frames(),
        [
            (1, digit(9)),
            (2, digit(0)),
            (3, digit(5)),
            (INDICATOR, Leds::AM_DOT),
            (INDICATOR, Leds::COLON),
        ]
    );
}

#[test]
fn colon_solid_outside_show_time() {
    let board = SimBoard::new();
    let clock = booted_clock();
    clock.set_program_mode(ProgramMode::SetTime);
    let panel = board.panel();

    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");

    let frames = board.take_frames();
    assert_eq!(frames.last(), Some(&(INDICATOR, Leds::COLON)));
}

#[test]
fn dwell_follows_brightness() {
    let board = SimBoard::new();
    let clock = booted_clock();
    let panel = board.panel();

    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");
    assert!(
        board
            .take_lit()
            .iter()
            .all(|lit| lit.duration_ns == u64::from(BRIGHT_DWELL_US) * 1000)
    );

    clock
        .with_state(|state| state.set_time(TimeOfDay::new(2, 0, 0, Meridiem::Am)))
        .expect("valid time");
    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");
    assert!(
        board
            .take_lit()
            .iter()
            .all(|lit| lit.duration_ns == u64::from(DIM_DWELL_US) * 1000)
    );
}

#[test]
fn armed_shows_alarm_dot() {
    let board = SimBoard::new();
    let clock = booted_clock();
    board.hold(Line::Switch);
    let panel = board.panel();

    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");

    assert!(clock.frame().alarm_state.armed);
    let frames = board.take_frames();
    assert_eq!(frames.last(), Some(&(3, Leds::ALARM_DOT)));
    assert_eq!(board.buzzer_rising(), [0, 0]);
}

#[test]
fn ringing_sounds_siren_once_per_second() {
    let board = SimBoard::new();
    let clock = booted_clock();
    board.hold(Line::Switch);
    clock.with_state(|state| state.set_alarm(state.time()));
    clock.evaluate_alarm(true);
    assert!(clock.is_ringing());
    let panel = board.panel();

    // No tick yet, so no buzz is due.
    with_panel(&panel, |panel| panel.render_time(&clock, 1)).expect("render");
    assert_eq!(board.buzzer_rising(), [0, 0]);

    clock.on_second_tick().expect("valid time");
    let start_ms = board.now_ms();
    with_panel(&panel, |panel| panel.render_time(&clock, 3)).expect("render");

    let cycles = 2 * usize::from(SIREN_CYCLES);
    assert_eq!(board.buzzer_rising(), [cycles, cycles]);
    assert_eq!(board.buzzer_levels(), [false, false]);
    assert!(board.now_ms() - start_ms >= 650);
    assert!(!clock.frame().buzz_due);
}

#[test]
fn switch_off_silences_within_one_cycle() {
    let board = SimBoard::new();
    let clock = booted_clock();
    board.hold(Line::Switch);
    clock.with_state(|state| state.set_alarm(state.time()));
    clock.evaluate_alarm(true);
    clock.on_second_tick().expect("valid time");
    assert!(clock.is_ringing());
    assert!(clock.frame().buzz_due);
    let panel = board.panel();

    // The copy of the switch in the clock state still says armed; the panel must not trust it.
    board.release(Line::Switch);
    with_panel(&panel, |panel| panel.render_time(&clock, 3)).expect("render");

    assert_eq!(board.buzzer_rising(), [0, 0]);
    assert!(!clock.is_ringing());
    assert!(!clock.frame().alarm_state.armed);
    assert!(
        board
            .take_frames()
            .iter()
            .all(|&frame| frame != (3, Leds::ALARM_DOT))
    );
}

#[test]
fn text_view_shows_scroll_window() {
    let board = SimBoard::new();
    let clock = booted_clock();
    clock.toggle_display_mode();
    for _ in 0..(SCROLL_PASSES + 1) * 4 {
        clock.advance_scroll();
    }
    let panel = board.panel();

    with_panel(&panel, |panel| panel.render_text(&clock, 1)).expect("render");

    assert_eq!(
        board.take_frames(),
        [
            (0, Leds::character('T')),
            (1, Leds::character('w')),
            (2, Leds::character('e')),
            (3, Leds::character('l')),
        ]
    );
}

#[test]
fn refresh_picks_view_and_counts_passes() {
    let board = SimBoard::new();
    let clock = booted_clock();
    clock.toggle_display_mode();
    let panel = board.panel();

    with_panel(&panel, |panel| panel.refresh(&clock)).expect("render");
    let frames = board.take_frames();
    assert_eq!(frames.len(), 4 * usize::from(LIVE_REPEATS));
    assert!(frames.iter().all(|&(_, segments)| segments == Leds::BLANK));
    assert_eq!(clock.with_state(|state| state.scroll().passes), 1);

    // Text is only for Show-Time.
    clock.set_program_mode(ProgramMode::SetAlarm);
    with_panel(&panel, |panel| panel.refresh(&clock)).expect("render");
    let frames = board.take_frames();
    assert_eq!(frames.len(), 5 * usize::from(LIVE_REPEATS));
    assert_eq!(frames.first(), Some(&(0, digit(1))));
}

#[test]
fn alarm_view_has_no_dot_or_siren() {
    let board = SimBoard::new();
    let clock = booted_clock();
    board.hold(Line::Switch);
    clock.with_state(|state| state.set_alarm(state.time()));
    clock.evaluate_alarm(true);
    clock.on_second_tick().expect("valid time");
    clock.with_state(|state| state.set_alarm(TimeOfDay::new(10, 0, 0, Meridiem::Am)));
    let panel = board.panel();

    let start_ms = board.now_ms();
    with_panel(&panel, |panel| panel.render_alarm(&clock, 2)).expect("render");

    let cycle = [
        (0, digit(1)),
        (1, digit(0)),
        (2, digit(0)),
        (3, digit(0)),
        (INDICATOR, Leds::AM_DOT),
        (INDICATOR, Leds::COLON),
    ];
    assert_eq!(board.take_frames(), [cycle, cycle].concat());
    assert_eq!(board.buzzer_rising(), [0, 0]);
    assert!(board.now_ms() - start_ms >= 2);
    assert!(clock.frame().buzz_due);
}

#[test]
fn refresh_skipped_when_suspended_or_busy() {
    let board = SimBoard::new();
    let clock = booted_clock();
    let panel = board.panel();

    assert!(refresh_if_enabled(&panel, &clock).expect("render"));
    assert!(!board.take_frames().is_empty());

    clock.suspend_refresh();
    assert!(!refresh_if_enabled(&panel, &clock).expect("render"));
    clock.resume_refresh();

    let guard = panel.try_lock().expect("free");
    assert!(!refresh_if_enabled(&panel, &clock).expect("render"));
    drop(guard);

    assert!(board.take_frames().is_empty());
}

#[test]
fn blank_for_lights_nothing() {
    let board = SimBoard::new();
    let panel = board.panel();
    with_panel(&panel, |panel| panel.blank_for(250)).expect("blank");
    assert!(board.take_frames().is_empty());
    assert_eq!(board.now_ms(), 250);
}
