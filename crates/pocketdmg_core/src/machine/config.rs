use typed_builder::TypedBuilder;

use super::memory::BOOT_ROM_SIZE;

/// Power-on options for a [`GameBoy`](super::GameBoy).
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    /// DMG boot ROM. Without one the machine starts in the state the boot
    /// ROM leaves behind, with PC at 0x0100.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<[u8; BOOT_ROM_SIZE]>,
    /// Fill work RAM and high RAM with a reproducible noise pattern instead
    /// of zeros.
    #[builder(default = true)]
    pub scramble_ram: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
