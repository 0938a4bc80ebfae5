use super::super::Cpu;

impl Cpu {
    /// Advance the EI pipeline by one instruction boundary.
    ///
    /// EI arms `ime_enable_pending`; the boundary after EI moves it into
    /// `ime_enable_delay`, and the one after the following instruction
    /// turns IME on.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        match (self.ime_enable_pending, self.ime_enable_delay) {
            (_, true) => {
                self.ime_enable_delay = false;
                self.ime = true;
            }
            (true, false) => {
                self.ime_enable_pending = false;
                self.ime_enable_delay = true;
            }
            (false, false) => {}
        }
    }
}
