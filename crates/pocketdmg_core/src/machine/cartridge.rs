//! Cartridge ROM/RAM and the banking controllers that map it into the
//! 0x0000-0x7FFF and 0xA000-0xBFFF windows.
mod header;
mod mbc1;
mod mbc3;
mod mbc5;

use thiserror::Error;

pub use header::CartridgeHeader;
use header::HEADER_END;
use mbc1::Mbc1;
use mbc3::Mbc3;
use mbc5::Mbc5;

pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
pub(crate) const RAM_BANK_SIZE: usize = 0x2000;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("ROM image is {len} bytes, too small to hold a cartridge header ({HEADER_END} bytes)")]
    TooSmall { len: usize },
    #[error("unsupported cartridge type {code:#04X}")]
    UnsupportedMapper { code: u8 },
}

/// Address translation performed by a banking controller.
///
/// Implementors only track bank-select latches; the backing storage lives
/// in [`Cartridge`].
pub trait Banking {
    /// Physical ROM offset for a CPU address in 0x0000-0x7FFF.
    fn resolve_rom(&self, addr: u16) -> usize;
    /// Physical RAM offset for a CPU address in 0xA000-0xBFFF, or `None`
    /// when external RAM is disabled or absent.
    fn resolve_ram(&self, addr: u16) -> Option<usize>;
    /// CPU write into the ROM window.
    fn on_control_write(&mut self, addr: u16, value: u8);
}

/// Banking controller selected by header byte 0x147.
#[derive(Clone, Debug)]
pub(crate) enum Mapper {
    RomOnly { has_ram: bool },
    Mbc1(Mbc1),
    Mbc3(Mbc3),
    Mbc5(Mbc5),
    /// Unknown controller; only bank 0 is mapped.
    Unsupported(u8),
}

impl Mapper {
    pub(crate) fn from_header(
        header: &CartridgeHeader,
        rom_banks: usize,
    ) -> Result<Self, CartridgeError> {
        let ram_banks = header.ram_banks();
        let mapper = match header.cartridge_type {
            0x00 => Mapper::RomOnly { has_ram: false },
            0x08 | 0x09 => Mapper::RomOnly {
                has_ram: ram_banks > 0,
            },
            0x01..=0x03 => Mapper::Mbc1(Mbc1::new(rom_banks, ram_banks)),
            0x0F..=0x13 => Mapper::Mbc3(Mbc3::new(rom_banks, ram_banks)),
            0x19..=0x1E => Mapper::Mbc5(Mbc5::new(rom_banks, ram_banks)),
            code => return Err(CartridgeError::UnsupportedMapper { code }),
        };
        Ok(mapper)
    }

    fn is_unsupported(&self) -> bool {
        matches!(self, Mapper::Unsupported(_))
    }

    fn has_ram(&self) -> bool {
        !matches!(
            self,
            Mapper::RomOnly { has_ram: false } | Mapper::Unsupported(_)
        )
    }
}

impl Banking for Mapper {
    fn resolve_rom(&self, addr: u16) -> usize {
        match self {
            Mapper::RomOnly { .. } => usize::from(addr & 0x7FFF),
            Mapper::Mbc1(m) => m.resolve_rom(addr),
            Mapper::Mbc3(m) => m.resolve_rom(addr),
            Mapper::Mbc5(m) => m.resolve_rom(addr),
            Mapper::Unsupported(_) => usize::from(addr & 0x3FFF),
        }
    }

    fn resolve_ram(&self, addr: u16) -> Option<usize> {
        match self {
            Mapper::RomOnly { has_ram: true } => Some(usize::from(addr & 0x1FFF)),
            Mapper::RomOnly { has_ram: false } | Mapper::Unsupported(_) => None,
            Mapper::Mbc1(m) => m.resolve_ram(addr),
            Mapper::Mbc3(m) => m.resolve_ram(addr),
            Mapper::Mbc5(m) => m.resolve_ram(addr),
        }
    }

    fn on_control_write(&mut self, addr: u16, value: u8) {
        match self {
            Mapper::Mbc1(m) => m.on_control_write(addr, value),
            Mapper::Mbc3(m) => m.on_control_write(addr, value),
            Mapper::Mbc5(m) => m.on_control_write(addr, value),
            Mapper::RomOnly { .. } | Mapper::Unsupported(_) => {}
        }
    }
}

/// Cartridge image plus its external RAM.
///
/// Save RAM is not persisted; it starts filled with 0xFF on every load.
#[derive(Clone, Debug)]
pub struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
}

impl Cartridge {
    pub fn new(rom: &[u8]) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::parse(rom)?;

        let mapper = match Mapper::from_header(&header, rom_banks(rom)) {
            Ok(mapper) => mapper,
            Err(err) => {
                log::warn!("{err}; only ROM bank 0 will be mapped");
                Mapper::Unsupported(header.cartridge_type)
            }
        };

        log::info!(
            "Cartridge '{}': type {:#04X}, {} KiB ROM ({} bytes in image), {} KiB RAM",
            header.title,
            header.cartridge_type,
            header.rom_size / 1024,
            rom.len(),
            header.ram_size / 1024,
        );

        let ram = if mapper.has_ram() {
            vec![0xFF; header.ram_size]
        } else {
            Vec::new()
        };

        Ok(Self {
            header,
            rom: rom.to_vec(),
            ram,
            mapper,
        })
    }

    /// Put every bank-select latch back to its power-on value. RAM
    /// contents survive.
    pub fn reset_banking(&mut self) {
        if let Ok(mapper) = Mapper::from_header(&self.header, rom_banks(&self.rom)) {
            self.mapper = mapper;
        }
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn read_rom(&self, addr: u16) -> u8 {
        if addr >= 0x4000 && self.mapper.is_unsupported() {
            return 0xFF;
        }
        let offset = self.mapper.resolve_rom(addr);
        self.rom.get(offset).copied().unwrap_or(0xFF)
    }

    pub fn write_rom(&mut self, addr: u16, value: u8) {
        self.mapper.on_control_write(addr, value);
    }

    pub fn read_ram(&self, addr: u16) -> u8 {
        match self.ram_offset(addr) {
            Some(offset) => self.ram[offset],
            None => 0xFF,
        }
    }

    pub fn write_ram(&mut self, addr: u16, value: u8) {
        if let Some(offset) = self.ram_offset(addr) {
            self.ram[offset] = value;
        }
    }

    /// RAM smaller than a bank (2 KiB parts) mirrors across the window.
    fn ram_offset(&self, addr: u16) -> Option<usize> {
        if self.ram.is_empty() {
            return None;
        }
        self.mapper
            .resolve_ram(addr)
            .map(|offset| offset % self.ram.len())
    }
}

fn rom_banks(rom: &[u8]) -> usize {
    rom.len().div_ceil(ROM_BANK_SIZE).max(2)
}

#[cfg(test)]
mod tests;
