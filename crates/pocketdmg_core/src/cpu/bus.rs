/// Abstraction over the 16-bit address space seen by the CPU.
///
/// `read8`/`write8` perform the access itself and never advance time.
/// Time only moves through `tick`, which the CPU calls once per machine
/// cycle (4 clock ticks) immediately before the access belonging to that
/// cycle, and once per internal cycle that does not touch the bus.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance everything clocked alongside the CPU by `ticks` clock units.
    ///
    /// The default does nothing, which is what flat test buses want.
    fn tick(&mut self, _ticks: u32) {}
}
