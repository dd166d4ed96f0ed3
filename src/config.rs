//! Build-time configuration. Nothing here is calibrated at runtime.

use crate::arch::stm32l4::Reload;
use crate::hal::hal_gpio::{Mode, OutputType, PinConfig, Pull, Speed};

/// MSI frequency out of reset; SysTick counts this clock.
pub const SYSCLK_HZ: u32 = 4_000_000;

/// Time each LED level is held.
pub const BLINK_PERIOD_MS: u32 = 1_000;

/// Busy-wait loop passes per LED level. Empirically tuned for the reset clock; re-derive it
/// when the clock or the optimization level changes.
pub const BUSY_WAIT_ITERATIONS: u32 = 400_000;

/// Push-pull output, low speed, pulled down so an unwritten pin reads OFF.
pub const LED_PIN_CONFIG: PinConfig = PinConfig {
    mode: Mode::Output,
    output_type: OutputType::PushPull,
    speed: Speed::Low,
    pull: Pull::Down,
};

pub const BLINK_RELOAD: Reload = match Reload::from_period(BLINK_PERIOD_MS, SYSCLK_HZ) {
    Ok(reload) => reload,
    Err(_) => panic!("BLINK_PERIOD_MS does not fit the SysTick reload register"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink_reload_is_one_second() {
        assert_eq!(BLINK_RELOAD.value(), 3_999_999);
    }
}
