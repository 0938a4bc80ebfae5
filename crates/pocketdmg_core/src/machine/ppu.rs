//! Scanline renderer.
//!
//! The PPU is clocked once per tick by the bus. Each line is 456 ticks:
//! 80 ticks of OAM search, a variable-length pixel transfer driven by a
//! tile fetcher and a pixel FIFO, then horizontal blank for the remainder.
//! Lines 144-153 form the vertical blank.
mod fetcher;
mod fifo;
mod sprites;

use fetcher::{BgFetcher, SpriteFetcher};
use fifo::{PaletteSource, Pixel, PixelFifo};
use sprites::{LineSprites, OamEntry, OAM_ENTRIES};

use super::interrupts::Interrupt;
use super::memory::{AddressSpace, LcdRegisters};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const DOTS_PER_LINE: u16 = 456;
pub const LINES_PER_FRAME: u8 = 154;
pub const DOTS_PER_FRAME: u32 = DOTS_PER_LINE as u32 * LINES_PER_FRAME as u32;
const OAM_SEARCH_DOTS: u16 = 80;

/// Shades after palette lookup, one byte per pixel (0 = lightest).
pub type FrameBuffer = [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// STAT bits 1-0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PpuMode {
    #[default]
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    PixelTransfer = 3,
}

/// Per-line pixel transfer state.
#[derive(Clone, Debug, Default)]
struct Transfer {
    fetcher: BgFetcher,
    sprite_fetch: Option<SpriteFetcher>,
    bg_fifo: PixelFifo,
    obj_fifo: PixelFifo,
    /// Pixels emitted on this line so far.
    cursor: u8,
    /// Leading pixels still to throw away for SCX fine scroll.
    discard: u8,
}

pub struct Ppu {
    mode: PpuMode,
    /// Tick within the current line, 0..456.
    dot: u16,
    /// LCDC bit 7 as of the previous tick.
    lcd_on: bool,
    sprites: LineSprites,
    transfer: Transfer,
    /// Internal line counter for the window; only advances on lines where
    /// the window was drawn.
    window_line: u8,
    /// WY matched LY at some line of this frame.
    window_y_reached: bool,
    /// Mode changed during this tick; consumed by the STAT check.
    mode_changed: bool,
    /// A new line (or the first line after LCD on) began this tick.
    line_started: bool,
    frame: Box<FrameBuffer>,
    frame_ready: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            mode: PpuMode::HBlank,
            dot: 0,
            lcd_on: false,
            sprites: LineSprites::default(),
            transfer: Transfer::default(),
            window_line: 0,
            window_y_reached: false,
            mode_changed: false,
            line_started: false,
            frame: Box::new([[0; SCREEN_WIDTH]; SCREEN_HEIGHT]),
            frame_ready: false,
        }
    }

    pub fn mode(&self) -> PpuMode {
        self.mode
    }

    /// Tick within the current scanline.
    pub fn dot(&self) -> u16 {
        self.dot
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Set when the last line of a frame completes.
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn clear_frame_ready(&mut self) {
        self.frame_ready = false;
    }

    /// Advance by one tick.
    pub fn tick(&mut self, mem: &mut AddressSpace) {
        if !self.sync_lcd_enable(mem) {
            return;
        }

        match self.mode {
            PpuMode::OamSearch => self.oam_search_dot(mem),
            PpuMode::PixelTransfer => self.pixel_transfer_dot(mem),
            PpuMode::HBlank | PpuMode::VBlank => {}
        }

        self.dot += 1;
        if self.dot == DOTS_PER_LINE {
            self.dot = 0;
            self.next_line(mem);
        }

        self.update_stat(mem);
    }

    /// Follow LCDC bit 7. Returns whether the PPU runs this tick.
    fn sync_lcd_enable(&mut self, mem: &mut AddressSpace) -> bool {
        let enabled = mem.lcd.lcd_enabled();
        if enabled == self.lcd_on {
            return enabled;
        }
        self.lcd_on = enabled;

        if enabled {
            log::debug!("LCD on");
            self.dot = 0;
            mem.lcd.ly = 0;
            self.window_line = 0;
            self.window_y_reached = false;
            self.line_started = true;
            self.enter_oam_search(mem);
        } else {
            log::debug!("LCD off at LY={} dot={}", mem.lcd.ly, self.dot);
            self.dot = 0;
            mem.lcd.ly = 0;
            self.set_mode(mem, PpuMode::HBlank);
            mem.set_vram_locked(false);
            mem.set_oam_locked(false);
            self.mode_changed = false;
            self.line_started = false;
        }
        enabled
    }

    fn set_mode(&mut self, mem: &mut AddressSpace, mode: PpuMode) {
        self.mode_changed |= self.mode != mode;
        self.mode = mode;
        mem.lcd.mode = mode;
    }

    fn enter_oam_search(&mut self, mem: &mut AddressSpace) {
        self.set_mode(mem, PpuMode::OamSearch);
        self.sprites.clear();
        mem.set_oam_locked(true);
        mem.set_vram_locked(false);
    }

    /// One OAM entry is examined every two ticks.
    fn oam_search_dot(&mut self, mem: &mut AddressSpace) {
        if self.dot % 2 == 0 {
            let index = (self.dot / 2) as u8;
            debug_assert!(usize::from(index) < OAM_ENTRIES);
            if !self.sprites.is_full() {
                let entry = OamEntry::read(mem.oam(), index);
                let height = if (mem.lcd.lcdc & 0x04) != 0 { 16 } else { 8 };
                if entry.covers_line(mem.lcd.ly, height) {
                    self.sprites.push(index, entry.x);
                }
            }
        }

        if self.dot == OAM_SEARCH_DOTS - 1 {
            self.sprites.sort_by_x();
            self.enter_pixel_transfer(mem);
        }
    }

    fn enter_pixel_transfer(&mut self, mem: &mut AddressSpace) {
        self.set_mode(mem, PpuMode::PixelTransfer);
        mem.set_vram_locked(true);
        mem.set_oam_locked(true);

        if mem.lcd.ly == mem.lcd.wy {
            self.window_y_reached = true;
        }
        self.transfer = Transfer {
            fetcher: BgFetcher::background(),
            discard: mem.lcd.scx & 0x07,
            ..Transfer::default()
        };
    }

    fn pixel_transfer_dot(&mut self, mem: &mut AddressSpace) {
        let half_tick = self.dot % 2 == 0;
        let lcd = &mem.lcd;

        if let Some(sprite) = self.transfer.sprite_fetch.as_mut() {
            if half_tick
                && sprite.step(
                    lcd,
                    mem.oam(),
                    mem.vram(),
                    &mut self.transfer.obj_fifo,
                    self.transfer.cursor,
                )
            {
                self.transfer.sprite_fetch = None;
            }
            return;
        }

        if self.window_triggers(lcd) {
            self.transfer.bg_fifo.clear();
            self.transfer.fetcher = BgFetcher::window();
            self.transfer.discard = 0;
        }

        if (lcd.lcdc & 0x02) == 0 {
            self.sprites.skip_all();
        } else if self.transfer.discard == 0 {
            if let Some(index) = self.sprites.take_due(self.transfer.cursor) {
                self.transfer.sprite_fetch = Some(SpriteFetcher::new(index));
                return;
            }
        }

        if half_tick {
            self.transfer.fetcher.step(
                lcd,
                self.window_line,
                mem.vram(),
                &mut self.transfer.bg_fifo,
            );
        }

        self.shift_pixel(mem);
    }

    fn window_triggers(&self, lcd: &LcdRegisters) -> bool {
        (lcd.lcdc & 0x20) != 0
            && self.window_y_reached
            && !self.transfer.fetcher.is_window()
            && u16::from(self.transfer.cursor) + 7 >= u16::from(lcd.wx)
    }

    /// Mixer: emit one pixel once the background FIFO holds at least eight.
    fn shift_pixel(&mut self, mem: &mut AddressSpace) {
        let transfer = &mut self.transfer;
        if transfer.bg_fifo.len() < 8 {
            return;
        }
        let Some(bg) = transfer.bg_fifo.pop() else {
            return;
        };
        if transfer.discard > 0 {
            transfer.discard -= 1;
            return;
        }
        let obj = transfer.obj_fifo.pop().unwrap_or_default();

        let lcd = &mem.lcd;
        let pixel = mix(bg, obj, lcd.lcdc);
        let palette = match pixel.source {
            PaletteSource::Background => lcd.bgp,
            PaletteSource::Obj0 => lcd.obp0,
            PaletteSource::Obj1 => lcd.obp1,
        };
        let shade = (palette >> (pixel.color * 2)) & 0x03;

        let x = usize::from(transfer.cursor);
        self.frame[usize::from(lcd.ly)][x] = shade;
        transfer.cursor += 1;

        if usize::from(transfer.cursor) == SCREEN_WIDTH {
            self.enter_hblank(mem);
        }
    }

    fn enter_hblank(&mut self, mem: &mut AddressSpace) {
        if self.transfer.fetcher.is_window() {
            self.window_line = self.window_line.wrapping_add(1);
        }
        self.set_mode(mem, PpuMode::HBlank);
        mem.set_vram_locked(false);
        mem.set_oam_locked(false);
    }

    fn next_line(&mut self, mem: &mut AddressSpace) {
        debug_assert!(
            self.mode != PpuMode::PixelTransfer && self.mode != PpuMode::OamSearch,
            "scanline ended in mode {:?}",
            self.mode
        );

        self.line_started = true;
        let ly = mem.lcd.ly + 1;
        if usize::from(ly) == SCREEN_HEIGHT {
            mem.lcd.ly = ly;
            self.set_mode(mem, PpuMode::VBlank);
            mem.interrupts.request(Interrupt::VBLANK);
            log::debug!("VBlank");
        } else if ly == LINES_PER_FRAME {
            mem.lcd.ly = 0;
            self.frame_ready = true;
            self.window_line = 0;
            self.window_y_reached = false;
            self.enter_oam_search(mem);
        } else {
            mem.lcd.ly = ly;
            if self.mode == PpuMode::HBlank {
                self.enter_oam_search(mem);
            }
        }
    }

    /// Each STAT source requests the interrupt on its own: a mode source
    /// on the tick that mode is entered, the LYC source on the tick a line
    /// with LY == LYC begins.
    fn update_stat(&mut self, mem: &mut AddressSpace) {
        let lcd = &mem.lcd;
        let stat = lcd.stat;
        let mode_source = self.mode_changed
            && match self.mode {
                PpuMode::HBlank => (stat & 0x08) != 0,
                PpuMode::VBlank => (stat & 0x10) != 0,
                PpuMode::OamSearch => (stat & 0x20) != 0,
                PpuMode::PixelTransfer => false,
            };
        let lyc_source = self.line_started && (stat & 0x40) != 0 && lcd.ly == lcd.lyc;

        if mode_source || lyc_source {
            mem.interrupts.request(Interrupt::STAT);
        }
        self.mode_changed = false;
        self.line_started = false;
    }
}

/// Pick the visible pixel. With LCDC bit 0 clear the background counts as
/// colour 0 for both display and sprite priority.
fn mix(bg: Pixel, obj: Pixel, lcdc: u8) -> Pixel {
    let bg = if (lcdc & 0x01) != 0 {
        bg
    } else {
        Pixel::background(0)
    };
    if obj.color != 0 && !(obj.behind_bg && bg.color != 0) {
        obj
    } else {
        bg
    }
}

#[cfg(test)]
mod tests;
