//! CPU-visible memory map.
//!
//! Every access from the CPU goes through [`AddressSpace::read`] and
//! [`AddressSpace::write`], which is where banking, the PPU access locks
//! and I/O register side effects are applied.
use super::cartridge::Cartridge;
use super::interrupts::InterruptController;
use super::joypad::Joypad;
use super::ppu::PpuMode;
use super::serial::Serial;
use super::sound::SoundRegisters;
use super::timer::Timer;

pub const BOOT_ROM_SIZE: usize = 0x100;
const VRAM_SIZE: usize = 0x2000;
const WRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
const HRAM_SIZE: usize = 0x7F;

/// LCD controller registers (FF40-FF4B).
///
/// `stat` only keeps the writable interrupt-select bits 3-6; the mode and
/// coincidence bits are produced on read.
#[derive(Clone, Debug, Default)]
pub(crate) struct LcdRegisters {
    pub(crate) lcdc: u8,
    pub(crate) stat: u8,
    pub(crate) scy: u8,
    pub(crate) scx: u8,
    pub(crate) ly: u8,
    pub(crate) lyc: u8,
    pub(crate) dma: u8,
    pub(crate) bgp: u8,
    pub(crate) obp0: u8,
    pub(crate) obp1: u8,
    pub(crate) wy: u8,
    pub(crate) wx: u8,
    pub(crate) mode: PpuMode,
}

impl LcdRegisters {
    pub(crate) fn lcd_enabled(&self) -> bool {
        (self.lcdc & 0x80) != 0
    }

    pub(crate) fn read_stat(&self) -> u8 {
        let coincidence = if self.ly == self.lyc { 0x04 } else { 0x00 };
        0x80 | (self.stat & 0x78) | coincidence | self.mode as u8
    }
}

pub struct AddressSpace {
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    /// Cleared for good by the first FF50 write with bit 0 set.
    boot_active: bool,
    cartridge: Option<Cartridge>,
    vram: Box<[u8]>,
    wram: Box<[u8]>,
    oam: [u8; OAM_SIZE],
    hram: [u8; HRAM_SIZE],
    vram_locked: bool,
    oam_locked: bool,
    pub(crate) lcd: LcdRegisters,
    pub(crate) interrupts: InterruptController,
    pub(crate) timer: Timer,
    pub(crate) serial: Serial,
    pub(crate) joypad: Joypad,
    pub(crate) sound: SoundRegisters,
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSpace {
    /// Power-on state: every register zero, no cartridge, no boot ROM.
    pub fn new() -> Self {
        Self {
            boot_rom: None,
            boot_active: false,
            cartridge: None,
            vram: vec![0; VRAM_SIZE].into_boxed_slice(),
            wram: vec![0; WRAM_SIZE].into_boxed_slice(),
            oam: [0; OAM_SIZE],
            hram: [0; HRAM_SIZE],
            vram_locked: false,
            oam_locked: false,
            lcd: LcdRegisters::default(),
            interrupts: InterruptController::new(),
            timer: Timer::new(),
            serial: Serial::default(),
            joypad: Joypad::default(),
            sound: SoundRegisters::default(),
        }
    }

    /// Overlay `image` on 0x0000-0x00FF until the program unmaps it.
    pub fn map_boot_rom(&mut self, image: [u8; BOOT_ROM_SIZE]) {
        self.boot_rom = Some(Box::new(image));
        self.boot_active = true;
    }

    pub fn boot_rom_active(&self) -> bool {
        self.boot_active
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub(crate) fn take_cartridge(&mut self) -> Option<Cartridge> {
        self.cartridge.take()
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_active => match &self.boot_rom {
                Some(boot) => boot[usize::from(addr)],
                None => 0xFF,
            },
            0x0000..=0x7FFF => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.read_rom(addr)),
            0x8000..=0x9FFF => {
                if self.vram_locked {
                    0xFF
                } else {
                    self.vram[usize::from(addr - 0x8000)]
                }
            }
            0xA000..=0xBFFF => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.read_ram(addr)),
            0xC000..=0xDFFF => self.wram[usize::from(addr - 0xC000)],
            0xE000..=0xFDFF => self.wram[usize::from(addr - 0xE000)],
            0xFE00..=0xFE9F => {
                if self.oam_locked {
                    0xFF
                } else {
                    self.oam[usize::from(addr - 0xFE00)]
                }
            }
            0xFEA0..=0xFEFF => 0xFF,
            0xFF00..=0xFF7F => self.read_io(addr),
            0xFF80..=0xFFFE => self.hram[usize::from(addr - 0xFF80)],
            0xFFFF => self.interrupts.read_enable(),
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write_rom(addr, value);
                }
            }
            0x8000..=0x9FFF => {
                if !self.vram_locked {
                    self.vram[usize::from(addr - 0x8000)] = value;
                }
            }
            0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write_ram(addr, value);
                }
            }
            0xC000..=0xDFFF => self.wram[usize::from(addr - 0xC000)] = value,
            0xE000..=0xFDFF => self.wram[usize::from(addr - 0xE000)] = value,
            0xFE00..=0xFE9F => {
                if !self.oam_locked {
                    self.oam[usize::from(addr - 0xFE00)] = value;
                }
            }
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.write_io(addr, value),
            0xFF80..=0xFFFE => self.hram[usize::from(addr - 0xFF80)] = value,
            0xFFFF => self.interrupts.write_enable(value),
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01 => self.serial.read_sb(),
            0xFF02 => self.serial.read_sc(),
            0xFF04 => self.timer.read_div(),
            0xFF05 => self.timer.read_tima(),
            0xFF06 => self.timer.read_tma(),
            0xFF07 => self.timer.read_tac(),
            0xFF0F => self.interrupts.read_flags(),
            0xFF10..=0xFF3F => self.sound.read(addr),
            0xFF40 => self.lcd.lcdc,
            0xFF41 => self.lcd.read_stat(),
            0xFF42 => self.lcd.scy,
            0xFF43 => self.lcd.scx,
            0xFF44 => self.lcd.ly,
            0xFF45 => self.lcd.lyc,
            0xFF46 => self.lcd.dma,
            0xFF47 => self.lcd.bgp,
            0xFF48 => self.lcd.obp0,
            0xFF49 => self.lcd.obp1,
            0xFF4A => self.lcd.wy,
            0xFF4B => self.lcd.wx,
            _ => 0xFF,
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.joypad.write(value),
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value),
            0xFF04 => self.timer.write_div(),
            0xFF05 => self.timer.write_tima(value),
            0xFF06 => self.timer.write_tma(value),
            0xFF07 => self.timer.write_tac(value),
            0xFF0F => self.interrupts.write_flags(value),
            0xFF10..=0xFF3F => self.sound.write(addr, value),
            0xFF40 => self.lcd.lcdc = value,
            0xFF41 => self.lcd.stat = value & 0x78,
            0xFF42 => self.lcd.scy = value,
            0xFF43 => self.lcd.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => self.lcd.lyc = value,
            0xFF46 => self.oam_dma(value),
            0xFF47 => self.lcd.bgp = value,
            0xFF48 => self.lcd.obp0 = value,
            0xFF49 => self.lcd.obp1 = value,
            0xFF4A => self.lcd.wy = value,
            0xFF4B => self.lcd.wx = value,
            0xFF50 => {
                if self.boot_active && (value & 0x01) != 0 {
                    self.boot_active = false;
                    log::info!("Boot ROM unmapped");
                }
            }
            _ => {}
        }
    }

    /// Copy 160 bytes from `page << 8` into OAM.
    ///
    /// The transfer completes at once. Bytes that land while the PPU holds
    /// OAM are dropped, and a locked VRAM source reads as 0xFF.
    fn oam_dma(&mut self, page: u8) {
        self.lcd.dma = page;
        let base = u16::from(page) << 8;
        if self.oam_locked {
            log::trace!("OAM DMA from {base:#06X} dropped, OAM locked");
            return;
        }
        log::trace!("OAM DMA from {base:#06X}");
        for i in 0..OAM_SIZE as u16 {
            self.oam[usize::from(i)] = self.dma_source(base.wrapping_add(i));
        }
    }

    fn dma_source(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF if self.vram_locked => 0xFF,
            0x8000..=0x9FFF => self.vram[usize::from(addr - 0x8000)],
            // Pages E0-FF mirror work RAM on the DMA bus.
            0xE000..=0xFFFF => self.wram[usize::from(addr & 0x1FFF)],
            _ => self.read(addr),
        }
    }

    /// Advance the machine-cycle clocked peripherals.
    pub(crate) fn tick_mcycle(&mut self) {
        self.timer.tick_mcycle(&mut self.interrupts);
        self.serial.tick_mcycle(&mut self.interrupts);
    }

    /// PPU-side views; these ignore the access locks.
    pub(crate) fn vram(&self) -> &[u8] {
        &self.vram
    }

    pub(crate) fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    pub(crate) fn set_vram_locked(&mut self, locked: bool) {
        self.vram_locked = locked;
    }

    pub(crate) fn set_oam_locked(&mut self, locked: bool) {
        self.oam_locked = locked;
    }

    pub fn vram_locked(&self) -> bool {
        self.vram_locked
    }

    pub fn oam_locked(&self) -> bool {
        self.oam_locked
    }

    /// I/O state the DMG boot ROM leaves behind at PC=0x0100.
    pub(crate) fn apply_post_boot_io(&mut self) {
        self.joypad.write(0x00);
        self.serial.init_dmg();
        self.timer.init_dmg();
        // IF reads back as 0xE1.
        self.interrupts.write_flags(0x01);
        self.interrupts.write_enable(0x00);
        self.sound.init_dmg();

        self.lcd.lcdc = 0x91;
        self.lcd.stat = 0x85 & 0x78;
        self.lcd.scy = 0x00;
        self.lcd.scx = 0x00;
        self.lcd.lyc = 0x00;
        self.lcd.dma = 0xFF;
        self.lcd.bgp = 0xFC;
        self.lcd.wy = 0x00;
        self.lcd.wx = 0x00;
    }

    /// Fill WRAM and HRAM with a fixed-seed xorshift32 sequence.
    ///
    /// Real power-on contents are noise. A fixed seed keeps runs
    /// reproducible while still not being all zeros.
    pub(crate) fn scramble_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };

        for byte in self.wram.iter_mut().chain(self.hram.iter_mut()) {
            *byte = next_byte();
        }
    }
}
