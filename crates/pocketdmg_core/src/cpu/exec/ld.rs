use crate::cpu::{Bus, Cpu, RegisterPair};

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));

        let value = self.fetch16(bus);
        self.regs.set_pair(RegisterPair::from_rp(opcode >> 4), value);
        12
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E
        ));

        let reg = (opcode >> 3) & 0x07;
        let value = self.fetch8(bus);
        self.write_reg8(bus, reg, value);

        if reg == 6 { 12 } else { 8 }
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let [hi, lo] = self.regs.sp.to_be_bytes();
        self.write_cycle(bus, addr, lo);
        self.write_cycle(bus, addr.wrapping_add(1), hi);
        20
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xE0 | 0xF0));

        let offset = self.fetch8(bus);
        let addr = 0xFF00 | u16::from(offset);
        if opcode == 0xE0 {
            self.write_cycle(bus, addr, self.regs.a);
        } else {
            self.regs.a = self.read_cycle(bus, addr);
        }
        12
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xE2 | 0xF2));

        let addr = 0xFF00 | u16::from(self.regs.c);
        if opcode == 0xE2 {
            self.write_cycle(bus, addr, self.regs.a);
        } else {
            self.regs.a = self.read_cycle(bus, addr);
        }
        8
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xEA | 0xFA));

        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            self.write_cycle(bus, addr, self.regs.a);
        } else {
            self.regs.a = self.read_cycle(bus, addr);
        }
        16
    }

    /// Address for the (BC), (DE), (HL+), (HL-) column, applying the HL
    /// post-increment or post-decrement.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));

        let addr = self.indirect_addr(opcode);
        self.write_cycle(bus, addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));

        let addr = self.indirect_addr(opcode);
        self.regs.a = self.read_cycle(bus, addr);
        8
    }

    pub(super) fn exec_ld_rr_or_halt<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x40..=0x7F).contains(&opcode));

        if opcode == 0x76 {
            self.enter_halt(bus);
            return 4;
        }

        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);

        if dst == 6 || src == 6 { 8 } else { 4 }
    }

    pub(super) fn exec_ld_sp_hl<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.idle_cycle(bus);
        self.regs.sp = self.regs.hl();
        8
    }
}
