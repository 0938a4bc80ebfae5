//! Sharp LR35902 CPU core.
//!
//! The CPU is driven one instruction at a time through [`Cpu::step`]. Every
//! memory access it performs first advances the rest of the machine through
//! [`Bus::tick`], so peripherals observe reads and writes at the machine cycle
//! where they happen on hardware rather than at the end of the instruction.

mod alu;
mod bus;
mod cb;
mod error;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use error::CpuError;
pub use regs::{Flag, RegisterPair, Registers};

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. The CPU idles until a joypad line goes low.
    stopped: bool,
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Fault latched by an opcode hole; the CPU stays dead until reset.
    fault: Option<CpuError>,
    /// Clock ticks already forwarded to the bus by the current step.
    ticks: u32,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        (self.regs.f & (1 << flag as u8)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = 1 << flag as u8;
        if value {
            self.regs.f |= mask;
        } else {
            self.regs.f &= !mask;
        }
    }

    #[inline]
    pub(crate) fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    /// Whether the CPU executed a STOP instruction and is still waiting
    /// for a joypad line to wake it.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The fault that locked the CPU, if any.
    pub fn fault(&self) -> Option<CpuError> {
        self.fault
    }
}
