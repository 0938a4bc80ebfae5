use super::{Banking, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC1 bank selection.
///
/// BANK1 is the 5-bit low ROM bank register (0 reads as 1), BANK2 the
/// 2-bit register that either extends the ROM bank or selects the RAM
/// bank. In mode 1 BANK2 also applies to the 0x0000-0x3FFF window and to
/// external RAM; in mode 0 both of those stay on bank 0.
#[derive(Clone, Debug)]
pub(crate) struct Mbc1 {
    rom_banks: usize,
    ram_banks: usize,
    bank1: u8,
    bank2: u8,
    advanced_mode: bool,
    ram_enabled: bool,
}

impl Mbc1 {
    pub(super) fn new(rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_banks,
            ram_banks,
            bank1: 1,
            bank2: 0,
            advanced_mode: false,
            ram_enabled: false,
        }
    }
}

impl Banking for Mbc1 {
    fn resolve_rom(&self, addr: u16) -> usize {
        let bank = if addr < 0x4000 {
            if self.advanced_mode {
                usize::from(self.bank2) << 5
            } else {
                0
            }
        } else {
            (usize::from(self.bank2) << 5) | usize::from(self.bank1)
        };
        (bank % self.rom_banks) * ROM_BANK_SIZE + usize::from(addr & 0x3FFF)
    }

    fn resolve_ram(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram_banks == 0 {
            return None;
        }
        let bank = if self.advanced_mode {
            usize::from(self.bank2) % self.ram_banks
        } else {
            0
        };
        Some(bank * RAM_BANK_SIZE + usize::from(addr & 0x1FFF))
    }

    fn on_control_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                self.bank1 = value & 0x1F;
                if self.bank1 == 0 {
                    self.bank1 = 1;
                }
            }
            0x4000..=0x5FFF => self.bank2 = value & 0x03,
            0x6000..=0x7FFF => self.advanced_mode = (value & 0x01) != 0,
            _ => {}
        }
    }
}
