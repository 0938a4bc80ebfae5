use super::CartridgeError;

const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
/// Smallest image that still contains the whole header.
pub(crate) const HEADER_END: usize = 0x0150;

/// Metadata read from the cartridge header at 0x0100-0x014F.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    /// Raw type byte at 0x147; selects the banking controller.
    pub cartridge_type: u8,
    /// Declared ROM size in bytes.
    pub rom_size: usize,
    /// Declared external RAM size in bytes.
    pub ram_size: usize,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < HEADER_END {
            return Err(CartridgeError::TooSmall { len: rom.len() });
        }

        // The title is NUL padded; later headers reuse the tail bytes for
        // a manufacturer code, so stop at the first non-printable byte.
        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0 && (b.is_ascii_graphic() || b == b' '))
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        let rom_code = rom[ROM_SIZE];
        let rom_size = if rom_code <= 0x08 {
            0x8000 << rom_code
        } else {
            rom.len()
        };

        let ram_size = match rom[RAM_SIZE] {
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x2_0000,
            0x05 => 0x1_0000,
            _ => 0,
        };

        Ok(Self {
            title,
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size,
            ram_size,
        })
    }

    pub fn ram_banks(&self) -> usize {
        self.ram_size.div_ceil(0x2000)
    }
}
