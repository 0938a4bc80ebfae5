use super::{Bus, Cpu};

/// Clock ticks in one machine cycle.
pub(super) const MCYCLE: u32 = 4;

impl Cpu {
    /// One bus read cycle: advance the machine by a machine cycle, then
    /// sample `addr`.
    #[inline]
    pub(super) fn read_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u8 {
        self.idle_cycle(bus);
        bus.read8(addr)
    }

    /// One bus write cycle, ordered like `read_cycle`.
    #[inline]
    pub(super) fn write_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16, value: u8) {
        self.idle_cycle(bus);
        bus.write8(addr, value);
    }

    /// One internal machine cycle that does not touch the bus.
    #[inline]
    pub(super) fn idle_cycle<B: Bus>(&mut self, bus: &mut B) {
        bus.tick(MCYCLE);
        self.ticks += MCYCLE;
    }

    /// Read an 8-bit register or (HL) by its 3-bit opcode index:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => self.read_cycle(bus, self.regs.hl()),
            _ => self.regs.a,
        }
    }

    /// Write an 8-bit register or (HL); the encoding matches `read_reg8`.
    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => self.write_cycle(bus, self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.read_cycle(bus, self.regs.pc);
        if self.halt_bug {
            // The first fetch after the HALT bug leaves PC where it was.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Two write cycles storing `value` below SP, high byte first.
    /// Callers add the internal cycle that precedes a push themselves.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.read_cycle(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = self.read_cycle(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    /// JR / JR cc. The displacement is relative to the byte after the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.idle_cycle(bus);
            self.regs.pc = self.regs.pc.wrapping_add_signed(i16::from(offset));
            12
        } else {
            8
        }
    }

    /// JP a16 / JP cc,a16.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.idle_cycle(bus);
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    /// CALL a16 / CALL cc,a16.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.idle_cycle(bus);
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    /// RET cc. The condition check itself costs an internal cycle.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        self.idle_cycle(bus);
        if cond {
            let addr = self.pop_u16(bus);
            self.idle_cycle(bus);
            self.regs.pc = addr;
            20
        } else {
            8
        }
    }
}
