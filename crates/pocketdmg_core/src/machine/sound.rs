//! Audio register file (FF10-FF3F). Registers are stored but no samples
//! are produced.

const NR52: u16 = 0xFF26;

/// Values left by the DMG boot ROM in FF10-FF26.
const POST_BOOT: [(u16, u8); 21] = [
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
];

#[derive(Clone, Debug)]
pub(crate) struct SoundRegisters {
    regs: [u8; 0x30],
}

impl Default for SoundRegisters {
    fn default() -> Self {
        Self { regs: [0; 0x30] }
    }
}

impl SoundRegisters {
    pub(crate) fn init_dmg(&mut self) {
        for (addr, value) in POST_BOOT {
            self.regs[index(addr)] = value;
        }
    }

    fn powered(&self) -> bool {
        (self.regs[index(NR52)] & 0x80) != 0
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            // Unused slots in the block read as open bus.
            0xFF15 | 0xFF1F | 0xFF27..=0xFF2F => 0xFF,
            NR52 => self.regs[index(NR52)] | 0x70,
            _ => self.regs[index(addr)],
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF10..=0xFF25 => {
                if self.powered() {
                    self.regs[index(addr)] = value;
                }
            }
            NR52 => self.write_nr52(value),
            // Wave RAM stays writable while the unit is off.
            0xFF30..=0xFF3F => self.regs[index(addr)] = value,
            _ => {}
        }
    }

    /// Only bit 7 is writable. Switching the unit off clears every
    /// channel register together with the channel status bits.
    fn write_nr52(&mut self, value: u8) {
        if self.powered() && (value & 0x80) == 0 {
            self.regs[..=index(NR52)].fill(0);
            log::debug!("APU powered off");
        }
        let nr52 = &mut self.regs[index(NR52)];
        *nr52 = (*nr52 & 0x7F) | (value & 0x80);
    }
}

#[inline]
fn index(addr: u16) -> usize {
    usize::from(addr - 0xFF10)
}
