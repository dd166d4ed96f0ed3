//! Hardware-timer period sources: SysTick polled through COUNTFLAG, or flipped from its
//! exception handler.

use crate::hal::hal_timer::{Countdown, PeriodSource};
use crate::toggle::ToggleState;

/// Checks the timer's expiry flag once per loop iteration and flips on each expiry.
pub struct Polled<C> {
    timer: C,
}

impl<C: Countdown> Polled<C> {
    pub fn new(timer: C) -> Self {
        Self { timer }
    }
}

impl<C: Countdown> PeriodSource for Polled<C> {
    fn service(&mut self, state: &ToggleState) {
        if self.timer.has_wrapped() {
            state.flip();
        }
    }
}

/// The timer exception flips the state; the control loop only reads it.
pub struct InterruptDriven;

impl InterruptDriven {
    /// Body of the timer exception handler.
    pub fn on_expiry(state: &ToggleState) {
        state.flip();
    }
}

impl PeriodSource for InterruptDriven {
    fn service(&mut self, _state: &ToggleState) {}
}
