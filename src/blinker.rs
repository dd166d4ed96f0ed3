use crate::arch::stm32l4::gpio::typestate::{Output, Unconfigured};
use crate::arch::stm32l4::{Pin, RccRegisters};
use crate::config::LED_PIN_CONFIG;
use crate::hal::hal_timer::PeriodSource;
use crate::hal::Led;
use crate::toggle::ToggleState;

/// The two board LEDs, switched together.
pub struct Leds<'a> {
    pins: [Pin<'a, Output>; 2],
}

/// Clocks the LED ports and configures both pins as push-pull, low-speed, pulled-down outputs.
pub fn configure_leds<'a>(
    rcc: &RccRegisters,
    led1: Pin<'a, Unconfigured>,
    led2: Pin<'a, Unconfigured>,
) -> Leds<'a> {
    rcc.enable_gpio_clock(led1.port());
    if led2.port() != led1.port() {
        rcc.enable_gpio_clock(led2.port());
    }

    Leds {
        pins: [
            led1.into_output(LED_PIN_CONFIG),
            led2.into_output(LED_PIN_CONFIG),
        ],
    }
}

impl<'a> Leds<'a> {
    pub fn pins(&self) -> &[Pin<'a, Output>; 2] {
        &self.pins
    }

    /// `Some(level)` when both LEDs are at the same level.
    pub fn level(&self) -> Option<bool> {
        let [a, b] = &self.pins;
        (a.is_set_high() == b.is_set_high()).then(|| a.is_set_high())
    }
}

impl Led for Leds<'_> {
    fn turn_on(&mut self) {
        for pin in &mut self.pins {
            pin.set_high();
        }
    }

    fn turn_off(&mut self) {
        for pin in &mut self.pins {
            pin.set_low();
        }
    }
}

/// The control loop: `ON` -> `OFF` -> `ON` ... forever, starting from the state in `state`.
///
/// Each iteration first drives the LEDs to the state if it changed since the last write, then
/// lets the period source advance the state.
pub struct Blinker<'s, L, S> {
    leds: L,
    source: S,
    state: &'s ToggleState,
    applied: Option<bool>,
}

impl<'s, L: Led, S: PeriodSource> Blinker<'s, L, S> {
    pub fn new(leds: L, source: S, state: &'s ToggleState) -> Self {
        Self {
            leds,
            source,
            state,
            applied: None,
        }
    }

    /// One loop iteration. Returns `true` when it wrote the LEDs.
    pub fn step(&mut self) -> bool {
        let on = self.state.is_on();
        let wrote = self.applied != Some(on);
        if wrote {
            if on {
                self.leds.turn_on();
            } else {
                self.leds.turn_off();
            }
            self.applied = Some(on);

            #[cfg(feature = "defmt")]
            defmt::trace!("LEDs {}", if on { "on" } else { "off" });
        }

        self.source.service(self.state);
        wrote
    }

    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }
}
