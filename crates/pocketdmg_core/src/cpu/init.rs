use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the DMG boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::power_on();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// CPU at true power-on: every register zero, PC at the boot ROM entry.
    pub fn power_on() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            fault: None,
            ticks: 0,
        }
    }

    /// Reset to the post-boot state, clearing any latched fault.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code (Pan Docs "Power Up Sequence").
    fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = 0xB0; // Z=1 N=0 H=1 C=1
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        // IME is clear when control reaches the cartridge.
        self.ime = false;
    }
}
