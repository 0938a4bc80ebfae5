use super::Timer;

impl Timer {
    pub(crate) fn read_div(&self) -> u8 {
        (self.internal_counter >> 6) as u8
    }

    /// Any write clears the whole counter. If the selected bit was high
    /// this is a falling edge and TIMA is clocked once.
    pub(crate) fn write_div(&mut self) {
        if self.input() {
            self.increment_tima();
        }
        self.internal_counter = 0;
    }

    pub(crate) fn read_tima(&self) -> u8 {
        self.tima
    }

    /// Writing TIMA in the cycle after an overflow cancels the pending
    /// reload and its interrupt.
    pub(crate) fn write_tima(&mut self, value: u8) {
        self.tima = value;
        self.overflow = false;
    }

    pub(crate) fn read_tma(&self) -> u8 {
        self.tma
    }

    pub(crate) fn write_tma(&mut self, value: u8) {
        self.tma = value;
    }

    pub(crate) fn read_tac(&self) -> u8 {
        self.tac | 0b1111_1000
    }

    /// Disabling the timer or switching the clock source while the
    /// selected bit is high produces an extra TIMA increment.
    pub(crate) fn write_tac(&mut self, value: u8) {
        let old = self.input();
        self.tac = value & 0x07;
        if old && !self.input() {
            self.increment_tima();
        }
    }
}
