//! Two-LED blinky for STM32L4.
//!
//! The LEDs on PA5 and PB14 alternate between ON and OFF. The period comes either from a
//! busy-wait loop or from the Cortex-M SysTick timer, polled or interrupt-driven. Everything
//! below `arch` talks to registers through [`arch::reg::Reg`], so the drivers run unchanged
//! against RAM copies of the register blocks in host tests.
#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod blinker;
pub mod config;
pub mod delay;
pub mod hal;
pub mod strategy;
pub mod toggle;
