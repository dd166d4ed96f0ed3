//! STM32L475/L476 register map: RCC, GPIO ports A..H and the Cortex-M SysTick.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::arch::reg::Reg;

pub mod gpio;
#[cfg(test)]
pub(crate) mod sim;
pub mod systick;

pub use gpio::{GpioPort, Pin, Pins};
pub use systick::{Reload, ReloadError, SysTickTimer, TickInterrupt};

const RCC_BASE: usize = 0x4002_1000;
const SYST_BASE: usize = 0xE000_E010;

/// Reset and clock control, up to AHB2ENR (offset 0x4C).
#[repr(C)]
pub struct RccRegisters {
    _reserved0: [Reg; 19],
    pub ahb2enr: Reg,
}

/// One GPIO port.
#[repr(C)]
pub struct GpioRegisters {
    pub moder: Reg,
    pub otyper: Reg,
    pub ospeedr: Reg,
    pub pupdr: Reg,
    pub idr: Reg,
    pub odr: Reg,
    pub bsrr: Reg,
    pub lckr: Reg,
    pub afrl: Reg,
    pub afrh: Reg,
    pub brr: Reg,
    pub ascr: Reg,
}

/// SysTick: control and status, reload value, current value, calibration.
#[repr(C)]
pub struct SysTickRegisters {
    pub csr: Reg,
    pub rvr: Reg,
    pub cvr: Reg,
    pub calib: Reg,
}

impl RccRegisters {
    /// Turns on the AHB2 clock of `port`. Bits of other peripherals are left alone.
    pub fn enable_gpio_clock(&self, port: Port) {
        self.ahb2enr.set_bits(port.ahb2_enable_bit());
        // Read back so the port registers are clocked before the first access.
        let _ = self.ahb2enr.read();
    }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

// Generates the `Port` enum and a `Board` field per port (gpioa, gpiob, ...).
macro_rules! gpio_ports {
    ($($port:ident: $base:literal),* $(,)?) => {
        paste::paste! {
            #[derive(Clone, Copy, Debug, PartialEq, Eq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub enum Port {
                $( $port, )*
            }

            impl Port {
                pub const fn base(self) -> usize {
                    match self {
                        $( Port::$port => $base, )*
                    }
                }
            }

            /// Exclusive handles to every peripheral the firmware touches.
            pub struct Board {
                pub rcc: &'static RccRegisters,
                pub syst: &'static SysTickRegisters,
                $( pub [<gpio $port:lower>]: GpioPort<'static>, )*
            }

            impl Board {
                /// # Safety
                /// Creates aliasing handles; callers must guarantee a single `Board` exists.
                unsafe fn steal() -> Self {
                    Board {
                        rcc: &*(RCC_BASE as *const RccRegisters),
                        syst: &*(SYST_BASE as *const SysTickRegisters),
                        $( [<gpio $port:lower>]: GpioPort::new(
                            Port::$port,
                            &*($base as *const GpioRegisters),
                        ), )*
                    }
                }
            }
        }
    };
}

gpio_ports!(
    A: 0x4800_0000,
    B: 0x4800_0400,
    C: 0x4800_0800,
    D: 0x4800_0C00,
    E: 0x4800_1000,
    F: 0x4800_1400,
    G: 0x4800_1800,
    H: 0x4800_1C00,
);

impl Port {
    /// GPIOxEN bit in RCC_AHB2ENR (A = bit 0 .. H = bit 7).
    pub const fn ahb2_enable_bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl Board {
    /// Returns the board peripherals the first time it is called, `None` afterwards.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(unsafe { Self::steal() })
        }
    }
}

#[cfg(test)]
impl RccRegisters {
    pub(crate) fn filled(value: u32) -> Self {
        Self {
            _reserved0: core::array::from_fn(|_| Reg::new(value)),
            ahb2enr: Reg::new(value),
        }
    }
}

#[cfg(test)]
impl GpioRegisters {
    pub(crate) fn filled(value: u32) -> Self {
        Self {
            moder: Reg::new(value),
            otyper: Reg::new(value),
            ospeedr: Reg::new(value),
            pupdr: Reg::new(value),
            idr: Reg::new(value),
            odr: Reg::new(value),
            bsrr: Reg::new(value),
            lckr: Reg::new(value),
            afrl: Reg::new(value),
            afrh: Reg::new(value),
            brr: Reg::new(value),
            ascr: Reg::new(value),
        }
    }
}

#[cfg(test)]
impl SysTickRegisters {
    pub(crate) fn reset() -> Self {
        Self {
            csr: Reg::new(0),
            rvr: Reg::new(0),
            cvr: Reg::new(0),
            calib: Reg::new(0),
        }
    }
}
