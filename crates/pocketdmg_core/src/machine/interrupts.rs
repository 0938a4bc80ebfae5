use bitflags::bitflags;

bitflags! {
    /// Interrupt sources as laid out in IF/IE. Lower bits win ties.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// Pending (IF) and enable (IE) masks.
///
/// IF only stores the five real sources and reads back with the upper
/// three bits set. IE is a plain 8-bit register.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    flags: Interrupt,
    enable: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, source: Interrupt) {
        self.flags.insert(source);
    }

    pub fn clear(&mut self, source: Interrupt) {
        self.flags.remove(source);
    }

    pub fn pending(&self) -> Interrupt {
        self.flags
    }

    pub fn enabled(&self) -> Interrupt {
        Interrupt::from_bits_truncate(self.enable)
    }

    pub fn read_flags(&self) -> u8 {
        0xE0 | self.flags.bits()
    }

    pub fn write_flags(&mut self, value: u8) {
        self.flags = Interrupt::from_bits_truncate(value);
    }

    pub fn read_enable(&self) -> u8 {
        self.enable
    }

    pub fn write_enable(&mut self, value: u8) {
        self.enable = value;
    }
}
