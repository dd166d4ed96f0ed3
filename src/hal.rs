pub mod hal_gpio;
pub mod hal_timer;

/// A group of LEDs switched together.
pub trait Led {
    /// Drives every LED of the group to its ON level.
    fn turn_on(&mut self);
    /// Drives every LED of the group to its OFF level.
    fn turn_off(&mut self);
}
