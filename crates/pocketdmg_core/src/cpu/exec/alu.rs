use crate::cpu::alu::AluOp;
use crate::cpu::{Bus, Cpu, Flag, RegisterPair};

impl Cpu {
    pub(super) fn exec_alu_reg_group<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));

        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu(AluOp::decode(opcode), value);

        if src == 6 { 8 } else { 4 }
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));

        let value = self.fetch8(bus);
        self.alu(AluOp::decode(opcode), value);
        8
    }

    /// RLCA, RRCA, RLA, RRA: the CB rotates on A, except Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));

        self.regs.a = self.alu_shift(opcode >> 3, self.regs.a);
        self.set_flag(Flag::Z, false);
        4
    }

    pub(super) fn exec_add_hl_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));

        self.idle_cycle(bus);
        let value = self.regs.pair(RegisterPair::from_rp(opcode >> 4));
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.idle_cycle(bus);
        self.idle_cycle(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.idle_cycle(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        12
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a ^= 0xFF;
        self.regs.f |= (1 << Flag::N as u8) | (1 << Flag::H as u8);
        4
    }

    /// SCF and CCF both clear N and H and only differ in the new carry.
    fn write_carry_only(&mut self, carry: bool) {
        let z = self.get_flag(Flag::Z);
        self.clear_flags();
        self.set_flag(Flag::Z, z);
        self.set_flag(Flag::C, carry);
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.write_carry_only(true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        self.write_carry_only(!self.get_flag(Flag::C));
        4
    }
}
