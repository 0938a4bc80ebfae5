pub mod cpu;
pub mod machine;

pub use cpu::{Cpu, CpuError};
pub use machine::{Buttons, CartridgeError, FrameBuffer, GameBoy, MachineConfig};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
