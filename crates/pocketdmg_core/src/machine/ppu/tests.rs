use super::*;

const LCDC_ON: u8 = 0x80;
const BG_ON: u8 = 0x01;
const OBJ_ON: u8 = 0x02;
const OBJ_TALL: u8 = 0x04;
const TILES_8000: u8 = 0x10;
const WINDOW_ON: u8 = 0x20;
const WINDOW_MAP_9C00: u8 = 0x40;

fn machine() -> (Ppu, AddressSpace) {
    let mut mem = AddressSpace::new();
    mem.write(0xFF47, 0xE4);
    mem.write(0xFF48, 0xE4);
    mem.write(0xFF49, 0x1B);
    (Ppu::new(), mem)
}

fn run(ppu: &mut Ppu, mem: &mut AddressSpace, ticks: u32) {
    for _ in 0..ticks {
        ppu.tick(mem);
    }
}

/// Fill tile `index` (in the 0x8000 table) with one row pattern.
fn solid_tile(mem: &mut AddressSpace, index: u16, low: u8, high: u8) {
    let base = 0x8000 + index * 16;
    for row in 0..8 {
        mem.write(base + row * 2, low);
        mem.write(base + row * 2 + 1, high);
    }
}

fn write_sprite(mem: &mut AddressSpace, slot: u16, y: u8, x: u8, tile: u8, flags: u8) {
    let base = 0xFE00 + slot * 4;
    mem.write(base, y);
    mem.write(base + 1, x);
    mem.write(base + 2, tile);
    mem.write(base + 3, flags);
}

/// Set up VRAM/OAM with the LCD off, switch it on with `lcdc` and render
/// one full frame.
fn render(lcdc: u8, setup: impl FnOnce(&mut AddressSpace)) -> (Ppu, AddressSpace) {
    let (mut ppu, mut mem) = machine();
    setup(&mut mem);
    mem.write(0xFF40, lcdc);
    run(&mut ppu, &mut mem, DOTS_PER_FRAME);
    assert!(ppu.frame_ready());
    (ppu, mem)
}

fn run_until(ppu: &mut Ppu, mem: &mut AddressSpace, mut done: impl FnMut(&Ppu, &AddressSpace) -> bool) {
    for _ in 0..2 * DOTS_PER_FRAME {
        if done(&*ppu, &*mem) {
            return;
        }
        ppu.tick(mem);
    }
    panic!("condition not reached within two frames");
}

#[test]
fn lcd_off_never_advances_scanline() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF40, 0x00);

    run(&mut ppu, &mut mem, 3 * DOTS_PER_FRAME);

    assert_eq!(mem.read(0xFF44), 0);
    assert!(!ppu.frame_ready());
    assert_eq!(ppu.mode(), PpuMode::HBlank);
    assert!(!mem.vram_locked());
    assert!(!mem.oam_locked());
}

#[test]
fn frame_ready_rises_once_per_frame() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF40, LCDC_ON | BG_ON);

    run(&mut ppu, &mut mem, DOTS_PER_FRAME - 1);
    assert!(!ppu.frame_ready());
    run(&mut ppu, &mut mem, 1);
    assert!(ppu.frame_ready());
    assert_eq!(mem.read(0xFF44), 0);

    ppu.clear_frame_ready();
    run(&mut ppu, &mut mem, DOTS_PER_FRAME - 1);
    assert!(!ppu.frame_ready());
    run(&mut ppu, &mut mem, 1);
    assert!(ppu.frame_ready());
}

#[test]
fn one_vblank_and_144_oam_openings_per_frame() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF41, 0x20);
    mem.write(0xFF40, LCDC_ON | BG_ON);
    // Start counting after line 0 has opened so the window covers lines
    // 1-143 and the next frame's line 0.
    run(&mut ppu, &mut mem, 1);
    mem.interrupts_mut().write_flags(0);

    let mut vblanks = 0;
    let mut stat = 0;
    for _ in 0..DOTS_PER_FRAME {
        ppu.tick(&mut mem);
        let pending = mem.interrupts().pending();
        if pending.contains(Interrupt::VBLANK) {
            vblanks += 1;
        }
        if pending.contains(Interrupt::STAT) {
            stat += 1;
        }
        mem.interrupts_mut().write_flags(0);
    }

    assert_eq!(vblanks, 1);
    assert_eq!(stat, 144);
}

/// Count STAT requests over one frame, starting after line 0 has opened.
fn stat_requests_per_frame(stat: u8, lyc: u8) -> u32 {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF45, lyc);
    mem.write(0xFF41, stat);
    mem.write(0xFF40, LCDC_ON | BG_ON);
    run(&mut ppu, &mut mem, 1);
    mem.interrupts_mut().write_flags(0);

    let mut requests = 0;
    for _ in 0..DOTS_PER_FRAME {
        ppu.tick(&mut mem);
        if mem.interrupts().pending().contains(Interrupt::STAT) {
            requests += 1;
        }
        mem.interrupts_mut().write_flags(0);
    }
    requests
}

#[test]
fn hblank_stat_fires_once_per_visible_line() {
    assert_eq!(stat_requests_per_frame(0x08, 0xFF), 144);
}

#[test]
fn vblank_stat_fires_with_the_vblank_interrupt() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF41, 0x10);
    mem.write(0xFF40, LCDC_ON | BG_ON);
    mem.interrupts_mut().write_flags(0);

    let mut requests = 0;
    for _ in 0..DOTS_PER_FRAME {
        ppu.tick(&mut mem);
        let pending = mem.interrupts().pending();
        if pending.contains(Interrupt::STAT) {
            requests += 1;
            assert!(pending.contains(Interrupt::VBLANK));
            assert_eq!(mem.read(0xFF44), 144);
        }
        mem.interrupts_mut().write_flags(0);
    }
    assert_eq!(requests, 1);
}

#[test]
fn mode_sources_fire_independently() {
    // Mode 2 and mode 0 enabled together: one request per entry into each.
    assert_eq!(stat_requests_per_frame(0x28, 0xFF), 288);
    // LYC on line 5 adds one more to the HBlank count.
    assert_eq!(stat_requests_per_frame(0x48, 5), 145);
}

#[test]
fn oam_search_requests_stat_after_hblank_already_did() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF41, 0x28);
    mem.write(0xFF40, LCDC_ON | BG_ON);

    run_until(&mut ppu, &mut mem, |ppu, mem| {
        ppu.mode() == PpuMode::HBlank && mem.read(0xFF44) == 5
    });
    assert!(mem.interrupts().pending().contains(Interrupt::STAT));
    mem.interrupts_mut().write_flags(0);

    run_until(&mut ppu, &mut mem, |ppu, _| ppu.mode() == PpuMode::OamSearch);
    assert_eq!(mem.read(0xFF44), 6);
    assert!(mem.interrupts().pending().contains(Interrupt::STAT));
}

#[test]
fn vblank_starts_at_line_144() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF40, LCDC_ON | BG_ON);

    run(&mut ppu, &mut mem, 144 * u32::from(DOTS_PER_LINE) - 1);
    assert_eq!(mem.read(0xFF44), 143);
    assert!(!mem.interrupts().pending().contains(Interrupt::VBLANK));

    run(&mut ppu, &mut mem, 1);
    assert_eq!(mem.read(0xFF44), 144);
    assert_eq!(ppu.mode(), PpuMode::VBlank);
    assert_eq!(mem.read(0xFF41) & 0x03, 1);
    assert!(mem.interrupts().pending().contains(Interrupt::VBLANK));
}

#[test]
fn lyc_match_raises_stat_once_per_frame() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF45, 10);
    mem.write(0xFF41, 0x40);
    mem.write(0xFF40, LCDC_ON | BG_ON);

    let mut requests = 0;
    for _ in 0..DOTS_PER_FRAME {
        ppu.tick(&mut mem);
        if mem.interrupts().pending().contains(Interrupt::STAT) {
            requests += 1;
            assert_eq!(mem.read(0xFF44), 10);
            assert_ne!(mem.read(0xFF41) & 0x04, 0);
        }
        mem.interrupts_mut().write_flags(0);
    }
    assert_eq!(requests, 1);
}

#[test]
fn scanline_modes_and_memory_locks() {
    let (mut ppu, mut mem) = machine();
    mem.write(0x8000, 0x42);
    mem.write(0xFE00, 0x24);
    mem.write(0xFF40, LCDC_ON | BG_ON);

    run(&mut ppu, &mut mem, 1);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    assert_eq!(mem.read(0xFF41) & 0x03, 2);
    assert_eq!(mem.read(0xFE00), 0xFF);
    assert_eq!(mem.read(0x8000), 0x42);
    mem.write(0xFE00, 0x00);

    run(&mut ppu, &mut mem, u32::from(OAM_SEARCH_DOTS) - 1);
    assert_eq!(ppu.mode(), PpuMode::PixelTransfer);
    assert_eq!(mem.read(0x8000), 0xFF);
    assert_eq!(mem.read(0xFE00), 0xFF);
    mem.write(0x8000, 0x00);

    run_until(&mut ppu, &mut mem, |ppu, _| ppu.mode() == PpuMode::HBlank);
    assert!(ppu.dot() > OAM_SEARCH_DOTS + 160);
    assert!(ppu.dot() < DOTS_PER_LINE);
    assert_eq!(mem.read(0xFF44), 0);
    assert_eq!(mem.read(0x8000), 0x42);
    assert_eq!(mem.read(0xFE00), 0x24);
}

#[test]
fn sprites_lengthen_pixel_transfer() {
    fn hblank_start(sprites: u16) -> u16 {
        let (mut ppu, mut mem) = machine();
        for slot in 0..sprites {
            write_sprite(&mut mem, slot, 16, 8 + slot as u8 * 8, 0, 0);
        }
        mem.write(0xFF40, LCDC_ON | BG_ON | OBJ_ON);
        run(&mut ppu, &mut mem, 1);
        run_until(&mut ppu, &mut mem, |ppu, _| ppu.mode() == PpuMode::HBlank);
        ppu.dot()
    }

    let plain = hblank_start(0);
    let busy = hblank_start(10);
    assert!(busy > plain);
    assert!(busy < DOTS_PER_LINE);
}

#[test]
fn lcd_disable_resets_and_reenable_restarts_at_line_zero() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF40, LCDC_ON | BG_ON);
    run(&mut ppu, &mut mem, 50 * u32::from(DOTS_PER_LINE) + 100);
    assert_eq!(mem.read(0xFF44), 50);

    mem.write(0xFF40, BG_ON);
    run(&mut ppu, &mut mem, 1);
    assert_eq!(mem.read(0xFF44), 0);
    assert_eq!(ppu.mode(), PpuMode::HBlank);
    assert!(!mem.vram_locked());
    assert!(!mem.oam_locked());

    mem.write(0xFF40, LCDC_ON | BG_ON);
    run(&mut ppu, &mut mem, 1);
    assert_eq!(mem.read(0xFF44), 0);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    assert_eq!(ppu.dot(), 1);
}

#[test]
fn ly_is_read_only() {
    let (mut ppu, mut mem) = machine();
    mem.write(0xFF40, LCDC_ON | BG_ON);
    run(&mut ppu, &mut mem, 3 * u32::from(DOTS_PER_LINE));

    mem.write(0xFF44, 99);
    assert_eq!(mem.read(0xFF44), 3);
}

#[test]
fn oam_search_keeps_first_ten_sorted_by_x_then_index() {
    let (mut ppu, mut mem) = machine();
    // Twelve sprites on line 0; the last two must be ignored.
    let xs = [50u8, 20, 20, 10, 90, 30, 30, 70, 60, 40, 1, 2];
    for (slot, &x) in xs.iter().enumerate() {
        write_sprite(&mut mem, slot as u16, 16, x, 0, 0);
    }
    // Off the line.
    write_sprite(&mut mem, 12, 40, 5, 0, 0);
    mem.write(0xFF40, LCDC_ON | BG_ON | OBJ_ON);

    run(&mut ppu, &mut mem, u32::from(OAM_SEARCH_DOTS));

    assert_eq!(ppu.sprites.len(), 10);
    assert_eq!(ppu.sprites.indices(), &[3, 1, 2, 5, 6, 9, 0, 8, 7, 4]);
}

#[test]
fn tall_sprites_cover_sixteen_lines() {
    let entry = OamEntry {
        y: 16,
        x: 8,
        tile: 0,
        flags: 0,
    };
    assert!(entry.covers_line(15, 16));
    assert!(!entry.covers_line(8, 8));
    assert!(entry.covers_line(7, 8));

    let partial = OamEntry { y: 12, ..entry };
    assert!(partial.covers_line(0, 8));
    assert!(!partial.covers_line(4, 8));
}

#[test]
fn background_fills_screen_through_palette() {
    let (ppu, _) = render(LCDC_ON | BG_ON | TILES_8000, |mem| {
        solid_tile(mem, 0, 0xFF, 0x00);
        mem.write(0xFF47, 0b0000_1100);
    });

    for row in ppu.frame_buffer().iter() {
        assert!(row.iter().all(|&shade| shade == 3));
    }
}

#[test]
fn signed_tile_addressing_uses_9000_base() {
    let (ppu, _) = render(LCDC_ON | BG_ON, |mem| {
        // Tile 0 in the signed table sits at 0x9000.
        for row in 0..8u16 {
            mem.write(0x9000 + row * 2, 0x00);
            mem.write(0x9000 + row * 2 + 1, 0xFF);
        }
    });

    assert_eq!(ppu.frame_buffer()[0][0], 2);
    assert_eq!(ppu.frame_buffer()[143][159], 2);
}

#[test]
fn fine_horizontal_scroll_drops_leading_pixels() {
    let stripe = |mem: &mut AddressSpace| solid_tile(mem, 0, 0x80, 0x00);

    let (ppu, _) = render(LCDC_ON | BG_ON | TILES_8000, stripe);
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 1);
    assert_eq!(row[1], 0);
    assert_eq!(row[8], 1);

    let (ppu, _) = render(LCDC_ON | BG_ON | TILES_8000, |mem| {
        stripe(mem);
        mem.write(0xFF43, 3);
    });
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 0);
    assert_eq!(row[5], 1);
    assert_eq!(row[13], 1);
}

#[test]
fn vertical_scroll_selects_map_row() {
    let (ppu, _) = render(LCDC_ON | BG_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0xFF);
        // Second map row uses tile 1.
        for col in 0..32 {
            mem.write(0x9820 + col, 1);
        }
        mem.write(0xFF42, 8);
    });

    assert_eq!(ppu.frame_buffer()[0][0], 3);
    assert_eq!(ppu.frame_buffer()[8][0], 0);
}

#[test]
fn sprite_drawn_with_obp0() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        write_sprite(mem, 0, 16, 8, 1, 0);
    });

    let frame = ppu.frame_buffer();
    assert!(frame[0][..8].iter().all(|&s| s == 1));
    assert_eq!(frame[0][8], 0);
    assert_eq!(frame[8][0], 0);
}

#[test]
fn sprite_uses_obp1_when_selected() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        write_sprite(mem, 0, 16, 8, 1, 0x10);
    });

    // OBP1 = 0x1B maps colour 1 to shade 2.
    assert_eq!(ppu.frame_buffer()[0][0], 2);
}

#[test]
fn sprites_hidden_when_obj_disabled() {
    let (ppu, _) = render(LCDC_ON | BG_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        write_sprite(mem, 0, 16, 8, 1, 0);
    });

    assert_eq!(ppu.frame_buffer()[0][0], 0);
}

#[test]
fn sprite_behind_nonzero_background() {
    let setup = |flags: u8| {
        move |mem: &mut AddressSpace| {
            // Background colour 2 on the left half of tile 0 only.
            solid_tile(mem, 0, 0x00, 0xF0);
            solid_tile(mem, 1, 0xFF, 0x00);
            write_sprite(mem, 0, 16, 8, 1, flags);
        }
    };

    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, setup(0x80));
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 2, "opaque background wins over a behind-BG sprite");
    assert_eq!(row[4], 1, "colour 0 background never hides a sprite");

    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, setup(0x00));
    assert_eq!(ppu.frame_buffer()[0][0], 1);
}

#[test]
fn transparent_sprite_pixels_show_background() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 0, 0xFF, 0xFF);
        // Only the leftmost column is opaque.
        solid_tile(mem, 1, 0x80, 0x80);
        write_sprite(mem, 0, 16, 8, 1, 0);
        mem.write(0xFF48, 0x00);
    });

    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 0);
    assert_eq!(row[1], 3);
}

#[test]
fn lower_x_wins_overlap_and_ties_go_to_lower_oam_index() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        solid_tile(mem, 2, 0x00, 0xFF);
        write_sprite(mem, 0, 16, 12, 1, 0);
        write_sprite(mem, 1, 16, 8, 2, 0);
    });
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 2);
    assert_eq!(row[5], 2);
    assert_eq!(row[9], 1);
    assert_eq!(row[12], 0);

    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        solid_tile(mem, 2, 0x00, 0xFF);
        write_sprite(mem, 0, 16, 8, 1, 0);
        write_sprite(mem, 1, 16, 8, 2, 0);
    });
    assert_eq!(ppu.frame_buffer()[0][3], 1);
}

#[test]
fn eleventh_sprite_on_a_line_is_dropped() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        for slot in 0..11u16 {
            write_sprite(mem, slot, 16, 8 + slot as u8 * 8, 1, 0);
        }
    });
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[72], 1);
    assert_eq!(row[79], 1);
    assert_eq!(row[80], 0);
}

#[test]
fn sprite_partially_off_left_edge() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        // Colours 1,2,3,0,... across the row.
        solid_tile(mem, 1, 0b1010_0000, 0b0110_0000);
        write_sprite(mem, 0, 16, 6, 1, 0);
    });
    let row = ppu.frame_buffer()[0];
    // The first two columns are off screen.
    assert_eq!(row[0], 3);
    assert_eq!(row[1], 0);
}

#[test]
fn sprite_x_and_y_flip() {
    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0x80, 0x00);
        write_sprite(mem, 0, 16, 8, 1, 0x20);
    });
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 0);
    assert_eq!(row[7], 1);

    let (ppu, _) = render(LCDC_ON | BG_ON | OBJ_ON | OBJ_TALL | TILES_8000, |mem| {
        // Tile 2 blank, tile 3 solid: an 8x16 sprite using tile 3 (or 2)
        // shows tile 3 on line 0 only when flipped vertically.
        solid_tile(mem, 3, 0xFF, 0xFF);
        write_sprite(mem, 0, 16, 8, 3, 0x40);
        write_sprite(mem, 1, 16, 40, 2, 0x00);
    });
    let frame = ppu.frame_buffer();
    assert_eq!(frame[0][0], 3);
    assert_eq!(frame[15][0], 0);
    assert_eq!(frame[0][32], 0);
    assert_eq!(frame[8][32], 3);
}

#[test]
fn background_disable_blanks_but_keeps_sprites() {
    let (ppu, _) = render(LCDC_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 0, 0xFF, 0xFF);
        solid_tile(mem, 1, 0xFF, 0x00);
        write_sprite(mem, 0, 16, 8, 1, 0x80);
    });
    let row = ppu.frame_buffer()[0];
    assert_eq!(row[0], 1);
    assert_eq!(row[8], 0);
}

#[test]
fn window_replaces_background_from_wx() {
    let lcdc = LCDC_ON | BG_ON | TILES_8000 | WINDOW_ON | WINDOW_MAP_9C00;
    let (ppu, _) = render(lcdc, |mem| {
        solid_tile(mem, 1, 0xFF, 0x00);
        for offset in 0..0x400 {
            mem.write(0x9C00 + offset, 1);
        }
        mem.write(0xFF4A, 4);
        mem.write(0xFF4B, 7 + 80);
    });

    let frame = ppu.frame_buffer();
    assert_eq!(frame[3][100], 0, "above WY");
    assert_eq!(frame[4][79], 0);
    assert_eq!(frame[4][80], 1);
    assert_eq!(frame[143][159], 1);
}

#[test]
fn window_line_counter_only_advances_when_drawn() {
    let lcdc = LCDC_ON | BG_ON | TILES_8000 | WINDOW_ON | WINDOW_MAP_9C00;
    let (ppu, _) = render(lcdc, |mem| {
        // Window map row 0 uses tile 0 (blank), row 1 uses tile 1.
        solid_tile(mem, 1, 0xFF, 0x00);
        for col in 0..32 {
            mem.write(0x9C20 + col, 1);
        }
        mem.write(0xFF4A, 10);
        mem.write(0xFF4B, 7);
    });

    let frame = ppu.frame_buffer();
    // Window row 8 (first row of map row 1) is drawn on LY 18.
    assert_eq!(frame[17][0], 0);
    assert_eq!(frame[18][0], 1);
}

#[test]
fn static_frame_renders_identically_twice() {
    let (mut ppu, mut mem) = render(LCDC_ON | BG_ON | OBJ_ON | TILES_8000, |mem| {
        solid_tile(mem, 1, 0x5A, 0x3C);
        for offset in 0..0x400u16 {
            mem.write(0x9800 + offset, (offset % 3) as u8);
        }
        write_sprite(mem, 0, 30, 40, 1, 0x20);
        mem.write(0xFF42, 5);
        mem.write(0xFF43, 3);
    });
    let first = *ppu.frame_buffer();

    ppu.clear_frame_ready();
    run(&mut ppu, &mut mem, DOTS_PER_FRAME);
    assert!(ppu.frame_ready());
    assert_eq!(first, *ppu.frame_buffer());
}
