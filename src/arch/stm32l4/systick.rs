use super::SysTickRegisters;
use crate::hal::hal_timer::Countdown;

pub const CSR_ENABLE: u32 = 1 << 0;
pub const CSR_TICKINT: u32 = 1 << 1;
pub const CSR_CLKSOURCE: u32 = 1 << 2;
pub const CSR_COUNTFLAG: u32 = 1 << 16;

/// RVR is 24 bits wide.
pub const RELOAD_MAX: u32 = 0x00FF_FFFF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReloadError {
    /// Fewer than two ticks; a reload value of zero stops the counter.
    TooShort,
    /// More ticks than the 24-bit reload register can hold.
    TooLong,
}

/// Value for the SysTick reload register: one less than the number of ticks per period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reload(u32);

impl Reload {
    pub const fn from_ticks(ticks: u32) -> Result<Self, ReloadError> {
        if ticks < 2 {
            Err(ReloadError::TooShort)
        } else if ticks - 1 > RELOAD_MAX {
            Err(ReloadError::TooLong)
        } else {
            Ok(Reload(ticks - 1))
        }
    }

    /// Converts a period in milliseconds at a fixed counting clock into a reload value.
    pub const fn from_period(period_ms: u32, clock_hz: u32) -> Result<Self, ReloadError> {
        let ticks = clock_hz as u64 * period_ms as u64 / 1_000;
        if ticks > u32::MAX as u64 {
            return Err(ReloadError::TooLong);
        }
        Self::from_ticks(ticks as u32)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Counting-clock cycles between two expiries.
    pub const fn ticks(self) -> u32 {
        self.0 + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickInterrupt {
    Disabled,
    Enabled,
}

/// The Cortex-M system timer, counting the processor clock.
pub struct SysTickTimer<'a> {
    regs: &'a SysTickRegisters,
}

impl<'a> SysTickTimer<'a> {
    pub fn new(regs: &'a SysTickRegisters) -> Self {
        Self { regs }
    }

    /// Starts the counter so it expires every `reload.ticks()` processor cycles.
    pub fn configure(&mut self, reload: Reload, interrupt: TickInterrupt) {
        self.regs.cvr.write(0);
        self.regs.rvr.write(reload.value());

        let mut bits = CSR_ENABLE | CSR_CLKSOURCE;
        if interrupt == TickInterrupt::Enabled {
            bits |= CSR_TICKINT;
        }
        self.regs.csr.set_bits(bits);

        #[cfg(feature = "defmt")]
        defmt::debug!("SysTick reload {=u32}, interrupt {}", reload.value(), interrupt);
    }
}

impl Countdown for SysTickTimer<'_> {
    /// COUNTFLAG clears when CSR is read, so each expiry is reported once.
    fn has_wrapped(&mut self) -> bool {
        self.regs.csr.read() & CSR_COUNTFLAG != 0
    }
}
