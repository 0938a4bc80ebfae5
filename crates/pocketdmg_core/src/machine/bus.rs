use crate::cpu::Bus;

use super::memory::AddressSpace;
use super::ppu::Ppu;

/// The CPU's view of the machine.
///
/// Memory accesses themselves are instantaneous; the CPU calls
/// [`Bus::tick`] ahead of each access, which is where the PPU and the
/// machine-cycle peripherals catch up.
#[derive(Default)]
pub struct GameBoyBus {
    pub(crate) memory: AddressSpace,
    pub(crate) ppu: Ppu,
    /// Ticks into the current machine cycle.
    phase: u8,
}

impl GameBoyBus {
    pub fn new(memory: AddressSpace) -> Self {
        Self {
            memory,
            ppu: Ppu::new(),
            phase: 0,
        }
    }

    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut AddressSpace {
        &mut self.memory
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }
}

impl Bus for GameBoyBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    fn tick(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.ppu.tick(&mut self.memory);
            self.phase += 1;
            if self.phase == 4 {
                self.phase = 0;
                self.memory.tick_mcycle();
            }
        }
    }
}
