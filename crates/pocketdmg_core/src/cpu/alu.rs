use super::{Cpu, Flag};

/// Eight-way ALU selector from opcode bits 3-5 (0x80-0xBF, and the d8 forms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    #[inline]
    pub(super) fn decode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => Self::Add,
            1 => Self::Adc,
            2 => Self::Sub,
            3 => Self::Sbc,
            4 => Self::And,
            5 => Self::Xor,
            6 => Self::Or,
            _ => Self::Cp,
        }
    }
}

impl Cpu {
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.regs.a = self.add8(value, false),
            AluOp::Adc => self.regs.a = self.add8(value, true),
            AluOp::Sub => self.regs.a = self.sub8(value, false),
            AluOp::Sbc => self.regs.a = self.sub8(value, true),
            AluOp::And => self.logic8(self.regs.a & value, true),
            AluOp::Xor => self.logic8(self.regs.a ^ value, false),
            AluOp::Or => self.logic8(self.regs.a | value, false),
            // Subtraction with the result thrown away.
            AluOp::Cp => {
                self.sub8(value, false);
            }
        }
    }

    /// 8-bit ADD/ADC against A. Returns the sum and sets all four flags.
    fn add8(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = u16::from(a) + u16::from(value) + u16::from(carry_in);
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, half > 0x0F);
        self.set_flag(Flag::C, full > 0xFF);
        result
    }

    /// 8-bit SUB/SBC against A. Returns the difference and sets all four
    /// flags; H and C are borrows out of bit 4 and bit 8.
    fn sub8(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.get_flag(Flag::C));

        let half = i16::from(a & 0x0F) - i16::from(value & 0x0F) - carry_in;
        let full = i16::from(a) - i16::from(value) - carry_in;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half < 0);
        self.set_flag(Flag::C, full < 0);
        result
    }

    /// AND/OR/XOR share a flag pattern: C always clear, H set only by AND.
    #[inline]
    fn logic8(&mut self, result: u8, half_carry: bool) {
        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, half_carry);
    }

    /// Decimal adjust A after a BCD addition or subtraction.
    ///
    /// Updates A, Z, H and C; N is preserved so a following DAA agrees.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL). Carry is left alone.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL). Carry is left alone.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// ADD HL,rr: H from bit 11, C from bit 15, Z untouched.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, u32::from(hl) + u32::from(value) > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// SP plus a signed 8-bit displacement (ADD SP,e and LD HL,SP+e).
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.clear_flags();
        self.set_flag(Flag::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// Shared body of the CB rotate/shift group and the unprefixed A rotates.
    ///
    /// `y` selects RLC, RRC, RL, RR, SLA, SRA, SWAP or SRL. Z is set from
    /// the result; callers that must clear it (RLCA etc.) do so afterwards.
    pub(super) fn alu_shift(&mut self, y: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match y & 0x07 {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry_out);
        result
    }
}
