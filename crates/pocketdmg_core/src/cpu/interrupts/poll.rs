use super::super::{Bus, Cpu};
use super::{IE_ADDR, IF_ADDR};

impl Cpu {
    /// `IE & IF` restricted to the five real sources. Reading through the
    /// bus here does not consume a machine cycle.
    #[inline]
    pub(in crate::cpu) fn pending_interrupts<B: Bus>(&self, bus: &mut B) -> u8 {
        bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & 0x1F
    }

    /// Decide whether an interrupt should be dispatched before the next fetch.
    ///
    /// A halted CPU wakes on any pending interrupt even with IME clear; it
    /// then resumes execution without servicing it.
    pub(in crate::cpu) fn poll_pending_interrupt<B: Bus>(&mut self, bus: &mut B) -> bool {
        if self.pending_interrupts(bus) == 0 {
            return false;
        }

        if self.halted && !self.ime {
            self.halted = false;
            return false;
        }

        self.ime
    }

    /// Select the lowest-numbered source still pending *after* the high
    /// byte of PC has been pushed.
    ///
    /// That push may land on IE (SP=0x0000), so IE is re-read here; the
    /// low-byte push that follows is too late to affect the choice.
    /// Returns the source index and the IF value with its bit cleared.
    pub(in crate::cpu) fn select_interrupt_after_high_push<B: Bus>(
        &self,
        bus: &mut B,
    ) -> Option<(u8, u8)> {
        let iflags = bus.read8(IF_ADDR);
        let pending = bus.read8(IE_ADDR) & iflags & 0x1F;
        if pending == 0 {
            return None;
        }

        let index = pending.trailing_zeros() as u8;
        Some((index, iflags & !(1 << index)))
    }
}
