use crate::toggle::ToggleState;

/// A down-counter that reports each time it has counted through zero.
pub trait Countdown {
    /// Returns `true` once per expiry. Observing an expiry consumes it.
    fn has_wrapped(&mut self) -> bool;
}

/// Something that knows when a blink period has elapsed.
///
/// Called once per control-loop iteration. Implementations advance `state` past every period
/// boundary reached since the previous call; they never touch GPIO.
pub trait PeriodSource {
    fn service(&mut self, state: &ToggleState);
}
