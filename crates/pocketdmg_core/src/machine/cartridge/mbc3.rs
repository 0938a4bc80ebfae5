use super::{Banking, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC3 without the real-time clock.
///
/// Selecting one of the RTC registers (0x08-0x0C) in the RAM bank
/// register unmaps external RAM, so those accesses read the open-bus
/// value and drop writes.
#[derive(Clone, Debug)]
pub(crate) struct Mbc3 {
    rom_banks: usize,
    ram_banks: usize,
    rom_bank: u8,
    ram_select: u8,
    ram_enabled: bool,
}

impl Mbc3 {
    pub(super) fn new(rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_banks,
            ram_banks,
            rom_bank: 1,
            ram_select: 0,
            ram_enabled: false,
        }
    }
}

impl Banking for Mbc3 {
    fn resolve_rom(&self, addr: u16) -> usize {
        let bank = if addr < 0x4000 {
            0
        } else {
            usize::from(self.rom_bank)
        };
        (bank % self.rom_banks) * ROM_BANK_SIZE + usize::from(addr & 0x3FFF)
    }

    fn resolve_ram(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram_banks == 0 || self.ram_select > 0x03 {
            return None;
        }
        let bank = usize::from(self.ram_select) % self.ram_banks;
        Some(bank * RAM_BANK_SIZE + usize::from(addr & 0x1FFF))
    }

    fn on_control_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = value & 0x7F;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
            }
            0x4000..=0x5FFF => self.ram_select = value,
            // Clock latch. There is no clock to latch.
            _ => {}
        }
    }
}
