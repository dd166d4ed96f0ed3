use core::sync::atomic::{AtomicBool, Ordering};

/// Whether the LEDs should currently be ON.
///
/// Shared by reference between the period source that flips it (possibly the SysTick exception)
/// and the control loop that reads it. Every access is an atomic load or store, so the main loop
/// sees a flip made by the exception handler on its next read instead of a cached copy.
///
/// There is exactly one writer. `flip` is a load followed by a store, not an atomic
/// read-modify-write, and is only sound with a single writer.
pub struct ToggleState {
    on: AtomicBool,
}

impl ToggleState {
    pub const fn new(on: bool) -> Self {
        Self {
            on: AtomicBool::new(on),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    pub fn flip(&self) {
        let on = self.on.load(Ordering::Relaxed);
        self.on.store(!on, Ordering::Release);
    }
}

impl Default for ToggleState {
    /// LEDs start ON.
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_by_default() {
        assert!(ToggleState::default().is_on());
    }

    #[test]
    fn flip_alternates() {
        let state = ToggleState::new(true);
        state.flip();
        assert!(!state.is_on());
        state.flip();
        assert!(state.is_on());
    }

    #[test]
    fn usable_from_a_static() {
        static STATE: ToggleState = ToggleState::new(false);
        STATE.flip();
        assert!(STATE.is_on());
    }
}
