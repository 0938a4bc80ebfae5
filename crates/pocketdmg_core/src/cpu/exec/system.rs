use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// HALT. With IME clear and an interrupt already pending the CPU does
    /// not halt; instead the next opcode fetch fails to advance PC.
    pub(super) fn enter_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.ime && self.pending_interrupts(bus) != 0 {
            self.halt_bug = true;
            return;
        }
        self.halted = true;
    }

    pub(super) fn exec_stop(&mut self) -> u32 {
        // STOP is two bytes long; the padding byte is skipped without a
        // bus cycle of its own.
        self.regs.pc = self.regs.pc.wrapping_add(1);
        self.stopped = true;
        self.halted = false;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
        4
    }
}
