use super::interrupts::{Interrupt, InterruptController};

/// Machine cycles needed to shift eight bits at the internal 8192 Hz clock.
const TRANSFER_MCYCLES: u16 = 1024;

/// SB/SC with no link partner attached.
///
/// An internally clocked transfer records SB in `output` (test ROMs print
/// through it), then shifts in 0xFF and raises the serial interrupt once
/// all eight bits have gone out.
#[derive(Clone, Debug, Default)]
pub(crate) struct Serial {
    sb: u8,
    sc: u8,
    /// Remaining machine cycles of the active transfer.
    countdown: Option<u16>,
    output: Vec<u8>,
}

impl Serial {
    pub(crate) fn init_dmg(&mut self) {
        self.sb = 0x00;
        self.sc = 0x7E;
    }

    pub(crate) fn read_sb(&self) -> u8 {
        self.sb
    }

    pub(crate) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    pub(crate) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(crate) fn write_sc(&mut self, value: u8) {
        self.sc = value;
        if (value & 0x81) == 0x81 {
            self.output.push(self.sb);
            self.countdown = Some(TRANSFER_MCYCLES);
        } else if (value & 0x80) == 0 {
            self.countdown = None;
        }
    }

    pub(crate) fn tick_mcycle(&mut self, interrupts: &mut InterruptController) {
        let Some(remaining) = self.countdown else {
            return;
        };
        if remaining > 1 {
            self.countdown = Some(remaining - 1);
            return;
        }
        self.countdown = None;
        self.sb = 0xFF;
        self.sc &= !0x80;
        interrupts.request(Interrupt::SERIAL);
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }
}
