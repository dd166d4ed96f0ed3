//! LEDs toggled from a blocking delay loop.

#![no_std]
#![no_main]

use cortex_m as _; // critical-section implementation used by defmt-rtt
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use l4_blinky::arch::Board;
use l4_blinky::blinker::{configure_leds, Blinker};
use l4_blinky::config::BUSY_WAIT_ITERATIONS;
use l4_blinky::delay::BusyWait;
use l4_blinky::toggle::ToggleState;

#[entry]
fn main() -> ! {
    defmt::info!("busy-wait blinky, {=u32} iterations per level", BUSY_WAIT_ITERATIONS);

    let board = Board::take().unwrap();
    let pa = board.gpioa.split();
    let pb = board.gpiob.split();
    let leds = configure_leds(board.rcc, pa.p5, pb.p14);
    defmt::debug!("LEDs configured");

    let state = ToggleState::new(true);
    Blinker::new(leds, BusyWait::new(BUSY_WAIT_ITERATIONS), &state).run()
}
