use super::helpers::MCYCLE;
use super::{Bus, Cpu, CpuError};

impl Cpu {
    /// Execute one instruction, or one interrupt dispatch, and return the
    /// number of clock ticks it took.
    ///
    /// Every bus access inside the instruction has already advanced the
    /// machine through [`Bus::tick`] by the time this returns. Once the CPU
    /// has hit an opcode hole every call returns the same error.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        self.ticks = 0;

        if self.stopped {
            // STOP ends when a joypad line goes low. The divider and the
            // LCD do not run meanwhile, so no time is forwarded, but the
            // nominal cost is still reported so callers make progress.
            let p1 = bus.read8(0xFF00);
            if (p1 & 0x0F) != 0x0F {
                self.stopped = false;
            }
            return Ok(MCYCLE);
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return Ok(self.settle(bus, cycles));
        }

        if self.halted {
            self.idle_cycle(bus);
            return Ok(MCYCLE);
        }

        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode)?;
        self.apply_ime_delay();
        Ok(self.settle(bus, cycles))
    }

    /// Reconcile the ticks forwarded during the step with the documented
    /// instruction length.
    fn settle<B: Bus>(&mut self, bus: &mut B, cycles: u32) -> u32 {
        debug_assert_eq!(
            self.ticks, cycles,
            "bus cycles of the last instruction disagree with its length"
        );
        if self.ticks < cycles {
            bus.tick(cycles - self.ticks);
            self.ticks = cycles;
        }
        cycles
    }
}
