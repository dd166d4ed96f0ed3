//! LEDs toggled by the SysTick timer.
//!
//! Built with `systick-irq`, the SysTick exception flips the shared state. Without it the main
//! loop polls COUNTFLAG.

#![no_std]
#![no_main]

use cortex_m as _; // critical-section implementation used by defmt-rtt
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use l4_blinky::arch::stm32l4::{SysTickTimer, TickInterrupt};
use l4_blinky::arch::Board;
use l4_blinky::blinker::{configure_leds, Blinker};
use l4_blinky::config::{BLINK_PERIOD_MS, BLINK_RELOAD};
use l4_blinky::toggle::ToggleState;

#[cfg(feature = "systick-irq")]
use l4_blinky::strategy::InterruptDriven;
#[cfg(not(feature = "systick-irq"))]
use l4_blinky::strategy::Polled;

/// Written by the SysTick exception (interrupt build), read by the control loop.
static LEDS_ON: ToggleState = ToggleState::new(true);

#[cfg(feature = "systick-irq")]
fn start_timer(mut timer: SysTickTimer<'static>) -> InterruptDriven {
    timer.configure(BLINK_RELOAD, TickInterrupt::Enabled);
    InterruptDriven
}

#[cfg(not(feature = "systick-irq"))]
fn start_timer(mut timer: SysTickTimer<'static>) -> Polled<SysTickTimer<'static>> {
    timer.configure(BLINK_RELOAD, TickInterrupt::Disabled);
    Polled::new(timer)
}

#[entry]
fn main() -> ! {
    defmt::info!(
        "SysTick blinky ({}), {=u32} ms per level",
        if cfg!(feature = "systick-irq") { "interrupt" } else { "polled" },
        BLINK_PERIOD_MS
    );

    let board = Board::take().unwrap();
    let source = start_timer(SysTickTimer::new(board.syst));

    let pa = board.gpioa.split();
    let pb = board.gpiob.split();
    let leds = configure_leds(board.rcc, pa.p5, pb.p14);
    defmt::debug!("SysTick and LEDs configured");

    Blinker::new(leds, source, &LEDS_ON).run()
}

#[cfg(feature = "systick-irq")]
#[cortex_m_rt::exception]
fn SysTick() {
    InterruptDriven::on_expiry(&LEDS_ON);
}
