//! Host model of the SysTick down-counter, driving a RAM copy of its registers.

use super::systick::{CSR_COUNTFLAG, CSR_ENABLE, CSR_TICKINT, RELOAD_MAX};
use super::SysTickRegisters;
use crate::hal::hal_timer::Countdown;

#[derive(Clone, Copy)]
pub(crate) struct SimSysTick<'a> {
    regs: &'a SysTickRegisters,
}

impl<'a> SimSysTick<'a> {
    pub(crate) fn new(regs: &'a SysTickRegisters) -> Self {
        Self { regs }
    }

    /// Runs the counter for `cycles` clock cycles. On each 1 -> 0 transition COUNTFLAG is set
    /// and, with TICKINT enabled, `exception` runs. At zero the next cycle reloads from RVR.
    /// Returns the number of expiries.
    pub(crate) fn advance(&self, cycles: u64, mut exception: impl FnMut()) -> u32 {
        let csr = self.regs.csr.read();
        if csr & CSR_ENABLE == 0 {
            return 0;
        }

        let mut remaining = cycles;
        let mut expiries = 0;
        while remaining > 0 {
            let current = self.regs.cvr.read();
            if current == 0 {
                self.regs.cvr.write(self.regs.rvr.read() & RELOAD_MAX);
                remaining -= 1;
                continue;
            }

            let step = remaining.min(current as u64) as u32;
            self.regs.cvr.write(current - step);
            remaining -= step as u64;

            if current == step {
                self.regs.csr.set_bits(CSR_COUNTFLAG);
                expiries += 1;
                if csr & CSR_TICKINT != 0 {
                    exception();
                }
            }
        }
        expiries
    }
}

impl Countdown for SimSysTick<'_> {
    fn has_wrapped(&mut self) -> bool {
        let csr = self.regs.csr.read();
        // Hardware clears COUNTFLAG as a side effect of the read.
        self.regs.csr.write(csr & !CSR_COUNTFLAG);
        csr & CSR_COUNTFLAG != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::stm32l4::{Reload, SysTickTimer, TickInterrupt};

    #[test]
    fn disabled_counter_does_not_move() {
        let regs = SysTickRegisters::reset();
        regs.rvr.write(9);
        assert_eq!(SimSysTick::new(&regs).advance(100, || {}), 0);
        assert_eq!(regs.cvr.read(), 0);
    }

    #[test]
    fn expires_every_reload_plus_one_cycles() {
        let regs = SysTickRegisters::reset();
        SysTickTimer::new(&regs).configure(Reload::from_ticks(10).unwrap(), TickInterrupt::Disabled);
        let mut sim = SimSysTick::new(&regs);

        assert_eq!(sim.advance(9, || {}), 0);
        assert_eq!(sim.advance(1, || {}), 1);
        assert!(sim.has_wrapped());
        assert!(!sim.has_wrapped());

        assert_eq!(sim.advance(95, || {}), 9);
        assert_eq!(sim.advance(5, || {}), 1);
    }

    #[test]
    fn exception_only_with_tickint() {
        let regs = SysTickRegisters::reset();
        SysTickTimer::new(&regs).configure(Reload::from_ticks(4).unwrap(), TickInterrupt::Enabled);
        let mut calls = 0;
        SimSysTick::new(&regs).advance(12, || calls += 1);
        assert_eq!(calls, 3);

        let regs = SysTickRegisters::reset();
        SysTickTimer::new(&regs).configure(Reload::from_ticks(4).unwrap(), TickInterrupt::Disabled);
        let mut calls = 0;
        SimSysTick::new(&regs).advance(12, || calls += 1);
        assert_eq!(calls, 0);
    }
}
