use crate::cpu::{Cpu, CpuError};

use super::cartridge::{Cartridge, CartridgeError, CartridgeHeader};
use super::joypad::Buttons;
use super::memory::AddressSpace;
use super::ppu::{FrameBuffer, Ppu, DOTS_PER_FRAME};
use super::{GameBoyBus, MachineConfig};

/// RGB value of each DMG shade, lightest first.
const SHADES: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

/// High-level Game Boy machine: the CPU plus everything behind the bus.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: MachineConfig,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

impl GameBoy {
    pub fn new(config: MachineConfig) -> Self {
        let mut memory = AddressSpace::new();
        if config.scramble_ram {
            memory.scramble_ram();
        }

        let cpu = match config.boot_rom {
            Some(image) => {
                memory.map_boot_rom(image);
                Cpu::power_on()
            }
            None => {
                memory.apply_post_boot_io();
                Cpu::new()
            }
        };

        Self {
            cpu,
            bus: GameBoyBus::new(memory),
            config,
        }
    }

    /// Turn the machine off and on again, keeping the inserted cartridge.
    pub fn power_cycle(&mut self) {
        let cartridge = self.bus.memory.take_cartridge();
        *self = Self::new(self.config.clone());
        if let Some(mut cartridge) = cartridge {
            cartridge.reset_banking();
            self.bus.memory.insert_cartridge(cartridge);
        }
    }

    pub fn load_cartridge(&mut self, rom: &[u8]) -> Result<CartridgeHeader, CartridgeError> {
        let cartridge = Cartridge::new(rom)?;
        let header = cartridge.header().clone();
        self.bus.memory.insert_cartridge(cartridge);
        Ok(header)
    }

    /// Execute one instruction (or interrupt dispatch) with every
    /// peripheral kept in step. Returns the ticks consumed.
    pub fn step(&mut self) -> Result<u32, CpuError> {
        self.cpu.step(&mut self.bus)
    }

    /// Run until the PPU completes a frame. With the LCD off no frame is
    /// ever produced, so this gives up after one frame's worth of ticks.
    pub fn step_frame(&mut self) -> Result<u32, CpuError> {
        self.bus.ppu.clear_frame_ready();
        let mut elapsed = 0;
        while elapsed < DOTS_PER_FRAME && !self.bus.ppu.frame_ready() {
            elapsed += self.step()?;
        }
        Ok(elapsed)
    }

    pub fn frame_ready(&self) -> bool {
        self.bus.ppu.frame_ready()
    }

    pub fn clear_frame_ready(&mut self) {
        self.bus.ppu.clear_frame_ready();
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.bus.ppu.frame_buffer()
    }

    /// Convert the frame buffer to packed RGB24 (160 * 144 * 3 bytes).
    pub fn video_frame(&self, buffer: &mut [u8]) {
        debug_assert!(buffer.len() >= crate::SCREEN_WIDTH * crate::SCREEN_HEIGHT * 3);
        let shades = self.frame_buffer().iter().flatten();
        for (rgb, &shade) in buffer.chunks_exact_mut(3).zip(shades) {
            rgb.fill(SHADES[usize::from(shade & 0x03)]);
        }
    }

    /// Replace the set of held keys.
    pub fn set_buttons(&mut self, buttons: Buttons) {
        let memory = &mut self.bus.memory;
        memory.joypad.set_buttons(buttons, &mut memory.interrupts);
    }

    /// Every byte sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.memory.serial.output()
    }

    pub fn memory(&self) -> &AddressSpace {
        &self.bus.memory
    }

    pub fn memory_mut(&mut self) -> &mut AddressSpace {
        &mut self.bus.memory
    }

    pub fn ppu(&self) -> &Ppu {
        &self.bus.ppu
    }

    pub fn bus_mut(&mut self) -> &mut GameBoyBus {
        &mut self.bus
    }
}
