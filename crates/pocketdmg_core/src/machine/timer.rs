/// Divider and timer (FF04-FF07).
///
/// Follows Pandocs' "Timer obscure behaviour": the divider is the upper
/// byte of a free-running counter and TIMA is clocked by the falling edge
/// of one counter bit selected through TAC. The counter advances once per
/// machine cycle.
mod io;

use super::interrupts::{Interrupt, InterruptController};

#[derive(Clone, Debug, Default)]
pub(crate) struct Timer {
    /// System counter in machine cycles; DIV exposes bits 13:6.
    internal_counter: u16,
    tima: u8,
    tma: u8,
    /// Lower three bits only.
    tac: u8,
    /// TIMA overflowed during the last machine cycle and still reads 0x00;
    /// the reload and interrupt happen on the next one.
    overflow: bool,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Counter value left behind by the DMG boot ROM, so DIV reads 0xAB at
    /// PC=0x0100.
    pub(crate) fn init_dmg(&mut self) {
        *self = Self {
            internal_counter: 0x2AC0,
            ..Self::default()
        };
    }

    #[inline]
    fn enabled(&self) -> bool {
        (self.tac & 0x04) != 0
    }

    /// TAC[1:0] selects the counter bit feeding TIMA:
    /// 00 -> bit 7, 01 -> bit 1, 10 -> bit 3, 11 -> bit 5.
    #[inline]
    fn counter_bit(&self) -> bool {
        let mask = match self.tac & 0x03 {
            0x00 => 1u16 << 7,
            0x01 => 1u16 << 1,
            0x02 => 1u16 << 3,
            _ => 1u16 << 5,
        };
        (self.internal_counter & mask) != 0
    }

    /// Timer input as seen by the edge detector.
    #[inline]
    fn input(&self) -> bool {
        self.enabled() && self.counter_bit()
    }

    #[inline]
    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            self.overflow = true;
        }
    }

    /// Advance by one machine cycle.
    pub(crate) fn tick_mcycle(&mut self, interrupts: &mut InterruptController) {
        if self.overflow {
            self.overflow = false;
            self.tima = self.tma;
            interrupts.request(Interrupt::TIMER);
        }

        let before = self.input();
        self.internal_counter = self.internal_counter.wrapping_add(1);
        if before && !self.input() {
            self.increment_tima();
        }
    }
}
