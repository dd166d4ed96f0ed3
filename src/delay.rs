use core::hint::black_box;

use crate::hal::hal_timer::PeriodSource;
use crate::toggle::ToggleState;

/// Blocking delay made of an empty counting loop.
///
/// The wall-clock length of one delay depends on the core clock and the code the compiler emits,
/// so `iterations` is a calibration value for a given board and build profile.
pub struct BusyWait {
    iterations: u32,
}

impl BusyWait {
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Spins for `iterations` loop passes. Holds the CPU the whole time.
    pub fn delay(&self) {
        for i in 0..self.iterations {
            // Keeps the loop from being optimized out.
            black_box(i);
        }
    }
}

impl PeriodSource for BusyWait {
    /// Every delay ends a period, so the state flips unconditionally.
    fn service(&mut self, state: &ToggleState) {
        self.delay();
        state.flip();
    }
}
