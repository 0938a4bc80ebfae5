use super::{Banking, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC5: 9-bit ROM bank (bank 0 is selectable in the upper window) and
/// a 4-bit RAM bank. The rumble motor bit is treated as part of the RAM
/// bank number.
#[derive(Clone, Debug)]
pub(crate) struct Mbc5 {
    rom_banks: usize,
    ram_banks: usize,
    rom_bank: u16,
    ram_bank: u8,
    ram_enabled: bool,
}

impl Mbc5 {
    pub(super) fn new(rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_banks,
            ram_banks,
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
        }
    }
}

impl Banking for Mbc5 {
    fn resolve_rom(&self, addr: u16) -> usize {
        let bank = if addr < 0x4000 {
            0
        } else {
            usize::from(self.rom_bank)
        };
        (bank % self.rom_banks) * ROM_BANK_SIZE + usize::from(addr & 0x3FFF)
    }

    fn resolve_ram(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram_banks == 0 {
            return None;
        }
        let bank = usize::from(self.ram_bank) % self.ram_banks;
        Some(bank * RAM_BANK_SIZE + usize::from(addr & 0x1FFF))
    }

    fn on_control_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = (value & 0x0F) == 0x0A,
            0x2000..=0x2FFF => self.rom_bank = (self.rom_bank & 0x100) | u16::from(value),
            0x3000..=0x3FFF => {
                self.rom_bank = (self.rom_bank & 0x0FF) | (u16::from(value & 0x01) << 8);
            }
            0x4000..=0x5FFF => self.ram_bank = value & 0x0F,
            _ => {}
        }
    }
}
