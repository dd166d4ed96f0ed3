use core::cell::UnsafeCell;
use core::ptr::{read_volatile, write_volatile};

/// A single 32-bit memory-mapped register.
///
/// Every access goes through `read_volatile`/`write_volatile`, so the compiler never caches or
/// elides a register access. Register blocks are `#[repr(C)]` structs of `Reg` overlaid on the
/// peripheral base address.
#[repr(transparent)]
pub struct Reg {
    value: UnsafeCell<u32>,
}

// Registers are shared between the main loop and exception handlers; each access is a single
// aligned word transfer.
unsafe impl Sync for Reg {}

impl Reg {
    pub const fn new(value: u32) -> Self {
        Self { value: UnsafeCell::new(value) }
    }

    #[inline(always)]
    pub fn read(&self) -> u32 {
        unsafe { read_volatile(self.value.get()) }
    }

    /// Full-register write, for registers that hold a single value (reload, current count).
    #[inline(always)]
    pub fn write(&self, value: u32) {
        unsafe { write_volatile(self.value.get(), value) }
    }

    /// Read-modify-write: replaces the bits selected by `mask` with `bits`, keeps everything else.
    #[inline(always)]
    pub fn modify(&self, mask: u32, bits: u32) {
        let v = self.read();
        self.write((v & !mask) | (bits & mask));
    }

    #[inline(always)]
    pub fn set_bits(&self, bits: u32) {
        self.modify(bits, bits);
    }

    #[inline(always)]
    pub fn clear_bits(&self, bits: u32) {
        self.modify(bits, 0);
    }

    pub fn write_field(&self, field: Field, value: u32) {
        self.modify(field.mask(), value << field.shift);
    }

    pub fn read_field(&self, field: Field) -> u32 {
        (self.read() & field.mask()) >> field.shift
    }
}

/// A contiguous bit-field inside a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    shift: u32,
    width: u32,
}

impl Field {
    pub const fn new(shift: u32, width: u32) -> Self {
        assert!(width > 0 && shift + width <= 32);
        Self { shift, width }
    }

    /// The 1-bit field of pin `pin` in registers such as OTYPER or ODR.
    pub const fn pin1(pin: u8) -> Self {
        Self::new(pin as u32, 1)
    }

    /// The 2-bit field of pin `pin` in registers such as MODER, OSPEEDR or PUPDR.
    pub const fn pin2(pin: u8) -> Self {
        Self::new(pin as u32 * 2, 2)
    }

    pub const fn mask(self) -> u32 {
        let ones = if self.width == 32 { u32::MAX } else { (1u32 << self.width) - 1 };
        ones << self.shift
    }
}
