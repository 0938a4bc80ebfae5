//! Everything on the far side of the CPU bus: memory map, PPU, cartridge
//! banking and the small I/O peripherals, wired together by [`GameBoy`].
mod bus;
mod cartridge;
mod config;
mod gameboy;
mod interrupts;
mod joypad;
mod memory;
mod ppu;
mod serial;
mod sound;
mod timer;

pub use bus::GameBoyBus;
pub use cartridge::{Banking, Cartridge, CartridgeError, CartridgeHeader};
pub use config::MachineConfig;
pub use gameboy::GameBoy;
pub use interrupts::{Interrupt, InterruptController};
pub use joypad::Buttons;
pub use memory::{AddressSpace, BOOT_ROM_SIZE};
pub use ppu::{FrameBuffer, Ppu, PpuMode, DOTS_PER_FRAME, DOTS_PER_LINE, LINES_PER_FRAME};
