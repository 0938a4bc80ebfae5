use super::super::{Bus, Cpu};
use super::{IF_ADDR, VECTOR_BASE};

impl Cpu {
    /// Dispatch a maskable interrupt if IME is set and one is pending.
    ///
    /// The entry sequence takes five machine cycles: two internal cycles,
    /// the two stack writes, and the jump. Returns `Some(20)` when taken.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.poll_pending_interrupt(bus) {
            return None;
        }

        self.ime = false;
        self.halted = false;

        self.idle_cycle(bus);
        self.idle_cycle(bus);

        let pc = self.regs.pc;
        let [hi, lo] = pc.to_be_bytes();

        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, hi);

        let selection = self.select_interrupt_after_high_push(bus);

        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, lo);

        self.regs.pc = match selection {
            Some((index, new_if)) => {
                let vector = VECTOR_BASE + u16::from(index) * 8;
                log::debug!(
                    "GB CPU interrupt: idx={} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
                    index,
                    vector,
                    pc,
                    self.regs.sp,
                );
                bus.write8(IF_ADDR, new_if);
                vector
            }
            // Nothing left pending after the high-byte push: the dispatch
            // is cancelled and execution continues at 0x0000.
            None => 0x0000,
        };
        self.idle_cycle(bus);

        Some(20)
    }
}
