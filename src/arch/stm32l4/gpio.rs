use core::marker::PhantomData;

use super::{GpioRegisters, Port};
use crate::arch::reg::Field;
use crate::hal::hal_gpio::Gpio as GpioTrait;
use crate::hal::hal_gpio::{Mode, OutputType, PinConfig, Pull, Speed};

pub mod typestate {
    pub struct Unconfigured;
    pub struct Output;
}

use typestate::*;

/// Handle to one GPIO port, consumed by [`GpioPort::split`].
pub struct GpioPort<'a> {
    port: Port,
    regs: &'a GpioRegisters,
}

impl<'a> GpioPort<'a> {
    pub(crate) const fn new(port: Port, regs: &'a GpioRegisters) -> Self {
        Self { port, regs }
    }
}

/// A single pin, parameterized by typestate. Only `Pin<Output>` can drive the pin, and only
/// `Pin<Unconfigured>` can be configured, so a pin is configured exactly once.
pub struct Pin<'a, MODE> {
    port: Port,
    index: u8,
    regs: &'a GpioRegisters,
    _mode: PhantomData<MODE>,
}

impl<'a, MODE> Pin<'a, MODE> {
    fn new(port: Port, regs: &'a GpioRegisters, index: u8) -> Self {
        assert!(index < 16);
        Pin {
            port,
            index,
            regs,
            _mode: PhantomData,
        }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    /// Decodes this pin's fields from MODER, OTYPER, OSPEEDR and PUPDR.
    pub fn config(&self) -> PinConfig {
        PinConfig {
            mode: Mode::from_bits(self.regs.moder.read_field(Field::pin2(self.index))),
            output_type: OutputType::from_bits(self.regs.otyper.read_field(Field::pin1(self.index))),
            speed: Speed::from_bits(self.regs.ospeedr.read_field(Field::pin2(self.index))),
            pull: Pull::from_bits(self.regs.pupdr.read_field(Field::pin2(self.index))),
        }
    }
}

impl<'a> Pin<'a, Unconfigured> {
    /// Programs this pin as an output. Only the pin's own bit-fields are written; the port clock
    /// must already be running.
    pub fn into_output(self, config: PinConfig) -> Pin<'a, Output> {
        assert!(config.mode == Mode::Output);
        let pin = self.index;

        self.regs
            .otyper
            .write_field(Field::pin1(pin), config.output_type as u32);
        self.regs
            .ospeedr
            .write_field(Field::pin2(pin), config.speed as u32);
        self.regs
            .pupdr
            .write_field(Field::pin2(pin), config.pull as u32);
        // Mode last, so the driver switches on with its final electrical setup.
        self.regs
            .moder
            .write_field(Field::pin2(pin), config.mode as u32);

        #[cfg(feature = "defmt")]
        defmt::debug!("P{}{=u8} configured: {}", self.port, pin, config);

        Pin::new(self.port, self.regs, pin)
    }
}

impl<'a> Pin<'a, Output> {
    pub fn set_high(&mut self) {
        self.regs.odr.set_bits(Field::pin1(self.index).mask());
    }

    pub fn set_low(&mut self) {
        self.regs.odr.clear_bits(Field::pin1(self.index).mask());
    }

    /// Output level last written to ODR.
    pub fn is_set_high(&self) -> bool {
        self.regs.odr.read_field(Field::pin1(self.index)) != 0
    }
}

impl GpioTrait for Pin<'_, Output> {
    fn write(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    fn read(&mut self) -> bool {
        self.is_set_high()
    }
}

// Generate the Pins struct with p0..p15 fields. Move-out enforces uniqueness.
macro_rules! make_pins {
    ($($idx:literal),*) => {
        paste::paste! {
            pub struct Pins<'a> {
                $( pub [<p $idx>]: Pin<'a, Unconfigured>, )*
            }

            impl<'a> GpioPort<'a> {
                pub fn split(self) -> Pins<'a> {
                    Pins { $( [<p $idx>]: Pin::new(self.port, self.regs, $idx), )* }
                }
            }
        }
    }
}

make_pins!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);

#[cfg(test)]
mod tests {
    use super::*;

    const LED: PinConfig = PinConfig {
        mode: Mode::Output,
        output_type: OutputType::PushPull,
        speed: Speed::Low,
        pull: Pull::Down,
    };

    #[test]
    fn split_hands_out_port_and_index() {
        let regs = GpioRegisters::filled(0);
        let pins = GpioPort::new(Port::B, &regs).split();
        assert_eq!(pins.p14.port(), Port::B);
        assert_eq!(pins.p14.index(), 14);
        assert_eq!(pins.p0.index(), 0);
    }

    #[test]
    fn into_output_only_touches_own_fields() {
        for background in [0x0000_0000, 0xFFFF_FFFF, 0xA5A5_5A5A] {
            let regs = GpioRegisters::filled(background);
            let pins = GpioPort::new(Port::A, &regs).split();
            let led = pins.p5.into_output(LED);

            assert_eq!(led.config(), LED);
            let two = Field::pin2(5).mask();
            let one = Field::pin1(5).mask();
            assert_eq!(regs.moder.read() & !two, background & !two);
            assert_eq!(regs.ospeedr.read() & !two, background & !two);
            assert_eq!(regs.pupdr.read() & !two, background & !two);
            assert_eq!(regs.otyper.read() & !one, background & !one);
            assert_eq!(regs.odr.read(), background);
            assert_eq!(regs.afrl.read(), background);
        }
    }

    #[test]
    fn field_encodings() {
        let regs = GpioRegisters::filled(0xFFFF_FFFF);
        let pins = GpioPort::new(Port::B, &regs).split();
        let _led = pins.p14.into_output(LED);
        // Bits 29:28 are pin 14's two-bit field.
        assert_eq!(regs.moder.read(), 0xDFFF_FFFF);
        assert_eq!(regs.ospeedr.read(), 0xCFFF_FFFF);
        assert_eq!(regs.pupdr.read(), 0xEFFF_FFFF);
        assert_eq!(regs.otyper.read(), 0xFFFF_BFFF);
    }

    #[test]
    fn output_writes_single_odr_bit() {
        let regs = GpioRegisters::filled(0);
        regs.odr.write(0x0000_8001);
        let pins = GpioPort::new(Port::A, &regs).split();
        let mut led = pins.p5.into_output(LED);

        led.set_high();
        assert_eq!(regs.odr.read(), 0x0000_8021);
        assert!(led.is_set_high());

        led.write(false);
        assert_eq!(regs.odr.read(), 0x0000_8001);
        assert!(!led.read());
    }

    #[test]
    #[should_panic]
    fn input_mode_is_not_an_output_config() {
        let regs = GpioRegisters::filled(0);
        let pins = GpioPort::new(Port::A, &regs).split();
        let _ = pins.p5.into_output(PinConfig {
            mode: Mode::Input,
            ..LED
        });
    }
}
