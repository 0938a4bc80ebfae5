use bitflags::bitflags;

use super::interrupts::{Interrupt, InterruptController};

bitflags! {
    /// Keys currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const SELECT = 1 << 6;
        const START = 1 << 7;
    }
}

/// P1/JOYP (FF00).
#[derive(Clone, Debug)]
pub(crate) struct Joypad {
    /// Bits 5 (buttons) and 4 (d-pad); 0 selects the group.
    select: u8,
    pressed: Buttons,
}

impl Default for Joypad {
    fn default() -> Self {
        Self {
            select: 0x30,
            pressed: Buttons::empty(),
        }
    }
}

impl Joypad {
    pub(crate) fn read(&self) -> u8 {
        // Bits 7-6 always read as 1; a pressed key reads as 0.
        let mut low = 0x0F;
        if (self.select & 0x10) == 0 {
            low &= !self.pressed.bits() & 0x0F;
        }
        if (self.select & 0x20) == 0 {
            low &= !(self.pressed.bits() >> 4) & 0x0F;
        }
        0xC0 | self.select | low
    }

    pub(crate) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// Keys whose group is currently selected through P1.
    fn selected(&self) -> Buttons {
        let mut keys = Buttons::empty();
        if (self.select & 0x10) == 0 {
            keys |= Buttons::RIGHT | Buttons::LEFT | Buttons::UP | Buttons::DOWN;
        }
        if (self.select & 0x20) == 0 {
            keys |= Buttons::A | Buttons::B | Buttons::SELECT | Buttons::START;
        }
        keys
    }

    /// Replace the key state. The joypad interrupt is requested when a key
    /// goes down in a selected group, which pulls a P1 input line low.
    pub(crate) fn set_buttons(&mut self, buttons: Buttons, interrupts: &mut InterruptController) {
        let newly_pressed = buttons & !self.pressed & self.selected();
        self.pressed = buttons;
        if !newly_pressed.is_empty() {
            interrupts.request(Interrupt::JOYPAD);
        }
    }
}
