mod ime;
mod poll;
mod service;

/// IF register address.
pub(super) const IF_ADDR: u16 = 0xFF0F;
/// IE register address.
pub(super) const IE_ADDR: u16 = 0xFFFF;
/// Service routine address of interrupt source 0 (v-blank); each further
/// source is 8 bytes higher.
pub(super) const VECTOR_BASE: u16 = 0x0040;
