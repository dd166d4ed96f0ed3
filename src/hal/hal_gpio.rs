/// Basic GPIO read/write trait
pub trait Gpio {
    fn write(&mut self, high: bool);
    fn read(&mut self) -> bool;
}

/// MODER encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Input = 0b00,
    Output = 0b01,
    Alternate = 0b10,
    Analog = 0b11,
}

/// OTYPER encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    PushPull = 0,
    OpenDrain = 1,
}

/// OSPEEDR encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low = 0b00,
    Medium = 0b01,
    High = 0b10,
    VeryHigh = 0b11,
}

/// Pull-up / Pull-down configuration (PUPDR encoding)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None = 0b00,
    Up = 0b01,
    Down = 0b10,
    /// Reserved encoding on STM32L4; never programmed by this crate.
    Both = 0b11,
}

/// Electrical configuration of one pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub mode: Mode,
    pub output_type: OutputType,
    pub speed: Speed,
    pub pull: Pull,
}

impl Mode {
    pub(crate) fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Mode::Input,
            0b01 => Mode::Output,
            0b10 => Mode::Alternate,
            _ => Mode::Analog,
        }
    }
}

impl OutputType {
    pub(crate) fn from_bits(bits: u32) -> Self {
        if bits & 1 == 0 {
            OutputType::PushPull
        } else {
            OutputType::OpenDrain
        }
    }
}

impl Speed {
    pub(crate) fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Speed::Low,
            0b01 => Speed::Medium,
            0b10 => Speed::High,
            _ => Speed::VeryHigh,
        }
    }
}

impl Pull {
    pub(crate) fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Pull::None,
            0b01 => Pull::Up,
            0b10 => Pull::Down,
            _ => Pull::Both,
        }
    }
}
