//! ClockIt alarm clock firmware for a Raspberry Pi Pico (RP2040).
//!
//! The once-a-second tick runs on the higher-priority interrupt executor and the display
//! refresh on the lower one, so a siren burst inside a refresh pass never delays the clock.
//! The buttons are polled by a blocking loop in thread mode.
#![no_std]
#![no_main]

use clockit::constants::{REFRESH_PERIOD_MS, TICK_PERIOD_MS};
use clockit::{
    ClockStatic, Foreground, Hardware, Never, Panel, Result, SharedPanel, Siren, refresh_if_enabled,
};
use defmt::info;
use defmt_rtt as _;
use embassy_executor::InterruptExecutor;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Ticker};
use panic_probe as _;
use static_cell::StaticCell;

type PicoPanel = SharedPanel<Output<'static>, Input<'static>, Delay>;

static CLOCK: ClockStatic = ClockStatic::new_static();
static PANEL: StaticCell<PicoPanel> = StaticCell::new();

static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();
static REFRESH_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
#[expect(unsafe_code, reason = "Interrupt handlers are unsafe to declare")]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is dedicated to TICK_EXECUTOR.
    unsafe { TICK_EXECUTOR.on_interrupt() }
}

#[interrupt]
#[expect(unsafe_code, reason = "Interrupt handlers are unsafe to declare")]
unsafe fn SWI_IRQ_0() {
    // SAFETY: SWI_IRQ_0 is dedicated to REFRESH_EXECUTOR.
    unsafe { REFRESH_EXECUTOR.on_interrupt() }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    // If it returns, something went wrong.
    let err = inner_main().unwrap_err();
    panic!("{err}");
}

fn inner_main() -> Result<Never> {
    let hardware = Hardware::default();
    CLOCK.boot()?;

    let panel: &'static PicoPanel = PANEL.init(Mutex::new(Panel::new(
        hardware.positions,
        hardware.segments,
        Siren::new(hardware.buzzer),
        hardware.switch,
        Delay,
    )));
    let foreground = Foreground::new(&CLOCK, panel, hardware.buttons, Delay);
    foreground.power_up_siren()?;

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let tick_spawner = TICK_EXECUTOR.start(interrupt::SWI_IRQ_1);
    tick_spawner.spawn(tick_loop(&CLOCK)?);

    interrupt::SWI_IRQ_0.set_priority(Priority::P3);
    let refresh_spawner = REFRESH_EXECUTOR.start(interrupt::SWI_IRQ_0);
    refresh_spawner.spawn(refresh_loop(&CLOCK, panel)?);

    info!("ClockIt running");
    foreground.run()
}

#[embassy_executor::task]
async fn tick_loop(clock: &'static ClockStatic) -> ! {
    let err = inner_tick_loop(clock).await.unwrap_err();
    panic!("{err}");
}

async fn inner_tick_loop(clock: &'static ClockStatic) -> Result<Never> {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        ticker.next().await;
        clock.on_second_tick()?;
    }
}

#[embassy_executor::task]
async fn refresh_loop(clock: &'static ClockStatic, panel: &'static PicoPanel) -> ! {
    let err = inner_refresh_loop(clock, panel).await.unwrap_err();
    panic!("{err}");
}

async fn inner_refresh_loop(clock: &'static ClockStatic, panel: &'static PicoPanel) -> Result<Never> {
    let mut ticker = Ticker::every(Duration::from_millis(REFRESH_PERIOD_MS));
    loop {
        ticker.next().await;
        refresh_if_enabled(panel, clock)?;
    }
}
