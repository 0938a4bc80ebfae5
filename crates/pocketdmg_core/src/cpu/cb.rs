use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute the byte following a 0xCB prefix.
    ///
    /// The table is fully populated: x selects rotate/shift, BIT, RES or SET,
    /// y the operation or bit number, and z the operand register.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let memory = z == 6;

        match x {
            0 => {
                let value = self.read_reg8(bus, z);
                let result = self.alu_shift(y, value);
                self.write_reg8(bus, z, result);
                if memory { 16 } else { 8 }
            }
            1 => {
                // BIT b, r: Z from the bit, H set, N clear, C preserved.
                let value = self.read_reg8(bus, z);
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                if memory { 12 } else { 8 }
            }
            2 => {
                let value = self.read_reg8(bus, z) & !(1 << y);
                self.write_reg8(bus, z, value);
                if memory { 16 } else { 8 }
            }
            _ => {
                let value = self.read_reg8(bus, z) | (1 << y);
                self.write_reg8(bus, z, value);
                if memory { 16 } else { 8 }
            }
        }
    }
}
