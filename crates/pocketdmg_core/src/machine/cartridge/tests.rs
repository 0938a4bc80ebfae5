use super::*;

/// Build a ROM image with `banks` 16 KiB banks where every byte of bank N
/// holds N (truncated to u8), and the given header bytes.
fn banked_rom(banks: usize, cart_type: u8, rom_code: u8, ram_code: u8) -> Vec<u8> {
    let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
    for (bank, chunk) in rom.chunks_mut(ROM_BANK_SIZE).enumerate() {
        chunk.fill(bank as u8);
    }
    rom[0x0134..0x0139].copy_from_slice(b"TESTS");
    rom[0x0139..0x0144].fill(0);
    rom[0x0147] = cart_type;
    rom[0x0148] = rom_code;
    rom[0x0149] = ram_code;
    rom
}

#[test]
fn header_parses_title_and_sizes() {
    let rom = banked_rom(4, 0x03, 0x01, 0x03);
    let header = CartridgeHeader::parse(&rom).unwrap();

    assert_eq!(header.title, "TESTS");
    assert_eq!(header.cartridge_type, 0x03);
    assert_eq!(header.rom_size, 64 * 1024);
    assert_eq!(header.ram_size, 32 * 1024);
    assert_eq!(header.ram_banks(), 4);
}

#[test]
fn image_without_header_is_rejected() {
    let err = Cartridge::new(&[0u8; 0x100]).unwrap_err();
    assert_eq!(err, CartridgeError::TooSmall { len: 0x100 });
}

#[test]
fn rom_only_maps_flat_32k() {
    let rom = banked_rom(2, 0x00, 0x00, 0x00);
    let mut cart = Cartridge::new(&rom).unwrap();

    assert_eq!(cart.read_rom(0x0000), 0);
    assert_eq!(cart.read_rom(0x4000), 1);
    cart.write_rom(0x2000, 0x05);
    assert_eq!(cart.read_rom(0x7FFF), 1);
    assert_eq!(cart.read_ram(0xA000), 0xFF);
}

#[test]
fn mbc1_switches_upper_window_and_remaps_bank_zero() {
    let rom = banked_rom(8, 0x01, 0x02, 0x00);
    let mut cart = Cartridge::new(&rom).unwrap();

    assert_eq!(cart.read_rom(0x4000), 1);
    cart.write_rom(0x2000, 0x05);
    assert_eq!(cart.read_rom(0x4000), 5);
    assert_eq!(cart.read_rom(0x0000), 0);

    cart.write_rom(0x2000, 0x00);
    assert_eq!(cart.read_rom(0x4000), 1);

    // Bank numbers past the end of the image wrap around.
    cart.write_rom(0x2000, 0x0B);
    assert_eq!(cart.read_rom(0x4000), 3);
}

#[test]
fn mbc1_high_bits_extend_rom_bank() {
    let rom = banked_rom(64, 0x01, 0x05, 0x00);
    let mut cart = Cartridge::new(&rom).unwrap();

    cart.write_rom(0x2000, 0x02);
    cart.write_rom(0x4000, 0x01);
    assert_eq!(cart.read_rom(0x4000), 0x22);

    // Mode 0 keeps the lower window on bank 0, mode 1 applies BANK2.
    assert_eq!(cart.read_rom(0x0000), 0);
    cart.write_rom(0x6000, 0x01);
    assert_eq!(cart.read_rom(0x0000), 0x20);
}

#[test]
fn mbc1_ram_requires_enable_and_banks_in_mode_one() {
    let rom = banked_rom(4, 0x03, 0x01, 0x03);
    let mut cart = Cartridge::new(&rom).unwrap();

    cart.write_ram(0xA000, 0x11);
    assert_eq!(cart.read_ram(0xA000), 0xFF);

    cart.write_rom(0x0000, 0x0A);
    cart.write_ram(0xA000, 0x11);
    assert_eq!(cart.read_ram(0xA000), 0x11);

    cart.write_rom(0x6000, 0x01);
    cart.write_rom(0x4000, 0x02);
    assert_eq!(cart.read_ram(0xA000), 0xFF);
    cart.write_ram(0xA000, 0x22);

    cart.write_rom(0x4000, 0x00);
    assert_eq!(cart.read_ram(0xA000), 0x11);
    cart.write_rom(0x4000, 0x02);
    assert_eq!(cart.read_ram(0xA000), 0x22);

    cart.write_rom(0x0000, 0x00);
    assert_eq!(cart.read_ram(0xA000), 0xFF);
}

#[test]
fn mbc3_rom_bank_and_rtc_select_unmaps_ram() {
    let rom = banked_rom(128, 0x13, 0x06, 0x03);
    let mut cart = Cartridge::new(&rom).unwrap();

    cart.write_rom(0x2000, 0x45);
    assert_eq!(cart.read_rom(0x4000), 0x45);
    cart.write_rom(0x2000, 0x00);
    assert_eq!(cart.read_rom(0x4000), 0x01);

    cart.write_rom(0x0000, 0x0A);
    cart.write_rom(0x4000, 0x01);
    cart.write_ram(0xB000, 0x5A);
    assert_eq!(cart.read_ram(0xB000), 0x5A);

    cart.write_rom(0x4000, 0x08);
    assert_eq!(cart.read_ram(0xB000), 0xFF);
    cart.write_ram(0xB000, 0x00);

    cart.write_rom(0x4000, 0x01);
    assert_eq!(cart.read_ram(0xB000), 0x5A);
}

#[test]
fn mbc5_nine_bit_bank_and_bank_zero_upper_window() {
    let rom = banked_rom(512, 0x19, 0x08, 0x00);
    let mut cart = Cartridge::new(&rom).unwrap();

    cart.write_rom(0x2000, 0x00);
    assert_eq!(cart.read_rom(0x4000), 0x00);

    cart.write_rom(0x2000, 0x23);
    cart.write_rom(0x3000, 0x01);
    // Bank 0x123 carries the low byte of its number.
    assert_eq!(cart.read_rom(0x4000), 0x23);
    assert_eq!(cart.read_rom(0x4001), 0x23);
    assert!(matches!(&cart.mapper, Mapper::Mbc5(_)));
}

#[test]
fn mbc5_ram_banks() {
    let rom = banked_rom(4, 0x1B, 0x01, 0x04);
    let mut cart = Cartridge::new(&rom).unwrap();

    cart.write_rom(0x0000, 0x0A);
    for bank in 0u8..16 {
        cart.write_rom(0x4000, bank);
        cart.write_ram(0xA123, bank.wrapping_mul(3));
    }
    for bank in 0u8..16 {
        cart.write_rom(0x4000, bank);
        assert_eq!(cart.read_ram(0xA123), bank.wrapping_mul(3));
    }
}

#[test]
fn small_ram_mirrors_across_window() {
    let rom = banked_rom(2, 0x03, 0x00, 0x01);
    let mut cart = Cartridge::new(&rom).unwrap();

    cart.write_rom(0x0000, 0x0A);
    cart.write_ram(0xA000, 0x77);
    assert_eq!(cart.read_ram(0xA800), 0x77);
}

#[test]
fn unsupported_mapper_only_exposes_bank_zero() {
    let rom = banked_rom(4, 0xFC, 0x01, 0x00);
    let header = CartridgeHeader::parse(&rom).unwrap();
    assert_eq!(
        Mapper::from_header(&header, 4).unwrap_err(),
        CartridgeError::UnsupportedMapper { code: 0xFC }
    );

    let mut cart = Cartridge::new(&rom).unwrap();
    assert!(matches!(&cart.mapper, Mapper::Unsupported(0xFC)));
    assert_eq!(cart.read_rom(0x0100), 0x00);
    assert_eq!(cart.read_rom(0x4000), 0xFF);
    cart.write_rom(0x2000, 0x02);
    assert_eq!(cart.read_rom(0x4000), 0xFF);
    assert_eq!(cart.read_ram(0xA000), 0xFF);
}
