use super::fifo::{PaletteSource, Pixel, PixelFifo};
use super::sprites::OamEntry;
use crate::machine::memory::LcdRegisters;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FetchStep {
    #[default]
    MapAddress,
    TileIndex,
    DataLow,
    DataHigh,
    /// Tile row is ready but the FIFO had no room for it.
    Push,
}

/// Whether the fetcher may run another step within the same half-tick.
enum Flow {
    Yield,
    Chain,
}

/// Background/window tile fetcher. Each call to [`step`](Self::step) is
/// one half-tick.
#[derive(Clone, Debug, Default)]
pub(crate) struct BgFetcher {
    step: FetchStep,
    window: bool,
    /// Tile column relative to the start of the line (or of the window).
    tile_x: u8,
    map_addr: u16,
    fine_y: u8,
    tile: u8,
    low: u8,
    high: u8,
}

impl BgFetcher {
    pub(crate) fn background() -> Self {
        Self::default()
    }

    pub(crate) fn window() -> Self {
        Self {
            window: true,
            ..Self::default()
        }
    }

    pub(crate) fn is_window(&self) -> bool {
        self.window
    }

    pub(crate) fn step(
        &mut self,
        lcd: &LcdRegisters,
        window_line: u8,
        vram: &[u8],
        fifo: &mut PixelFifo,
    ) {
        // A deferred push that succeeds frees the fetcher to start the
        // next tile in the same half-tick.
        loop {
            let flow = match self.step {
                FetchStep::MapAddress => {
                    self.map_address(lcd, window_line);
                    self.step = FetchStep::TileIndex;
                    Flow::Yield
                }
                FetchStep::TileIndex => {
                    self.tile = vram[usize::from(self.map_addr - 0x8000)];
                    self.step = FetchStep::DataLow;
                    Flow::Yield
                }
                FetchStep::DataLow => {
                    self.low = vram[usize::from(self.data_addr(lcd) - 0x8000)];
                    self.step = FetchStep::DataHigh;
                    Flow::Yield
                }
                FetchStep::DataHigh => {
                    self.high = vram[usize::from(self.data_addr(lcd) + 1 - 0x8000)];
                    self.step = if self.try_push(fifo) {
                        FetchStep::MapAddress
                    } else {
                        FetchStep::Push
                    };
                    Flow::Yield
                }
                FetchStep::Push => {
                    if self.try_push(fifo) {
                        self.step = FetchStep::MapAddress;
                        Flow::Chain
                    } else {
                        Flow::Yield
                    }
                }
            };
            if let Flow::Yield = flow {
                break;
            }
        }
    }

    fn map_address(&mut self, lcd: &LcdRegisters, window_line: u8) {
        let (base, row, col) = if self.window {
            let base = if (lcd.lcdc & 0x40) != 0 { 0x9C00 } else { 0x9800 };
            (base, window_line, self.tile_x & 0x1F)
        } else {
            let base = if (lcd.lcdc & 0x08) != 0 { 0x9C00 } else { 0x9800 };
            let row = lcd.ly.wrapping_add(lcd.scy);
            let col = (lcd.scx >> 3).wrapping_add(self.tile_x) & 0x1F;
            (base, row, col)
        };
        self.fine_y = row & 0x07;
        self.map_addr = base + u16::from(row / 8) * 32 + u16::from(col);
    }

    /// Address of the low byte of the current tile row. LCDC bit 4 picks
    /// unsigned indexing from 0x8000 or signed indexing around 0x9000.
    fn data_addr(&self, lcd: &LcdRegisters) -> u16 {
        let row = u16::from(self.fine_y) * 2;
        if (lcd.lcdc & 0x10) != 0 {
            0x8000 + u16::from(self.tile) * 16 + row
        } else {
            0x9000u16.wrapping_add_signed(i16::from(self.tile as i8) * 16) + row
        }
    }

    fn try_push(&mut self, fifo: &mut PixelFifo) -> bool {
        if fifo.len() > 8 {
            return false;
        }
        for bit in (0..8).rev() {
            fifo.push(Pixel::background(tile_color(self.low, self.high, bit)));
        }
        self.tile_x = self.tile_x.wrapping_add(1);
        true
    }
}

#[inline]
fn tile_color(low: u8, high: u8, bit: u8) -> u8 {
    (((high >> bit) & 1) << 1) | ((low >> bit) & 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpriteStep {
    Attributes,
    DataLow,
    DataHigh,
}

/// Fetch of a single sprite row; stalls the background fetcher and the
/// mixer until it completes.
#[derive(Clone, Debug)]
pub(crate) struct SpriteFetcher {
    index: u8,
    step: SpriteStep,
    entry: Option<OamEntry>,
    addr: u16,
    low: u8,
}

impl SpriteFetcher {
    pub(crate) fn new(index: u8) -> Self {
        Self {
            index,
            step: SpriteStep::Attributes,
            entry: None,
            addr: 0x8000,
            low: 0,
        }
    }

    /// One half-tick. Returns true once the row has been merged.
    pub(crate) fn step(
        &mut self,
        lcd: &LcdRegisters,
        oam: &[u8],
        vram: &[u8],
        obj_fifo: &mut PixelFifo,
        cursor: u8,
    ) -> bool {
        match self.step {
            SpriteStep::Attributes => {
                let entry = OamEntry::read(oam, self.index);
                let tall = (lcd.lcdc & 0x04) != 0;
                let height: i16 = if tall { 16 } else { 8 };
                let mut row = i16::from(lcd.ly) + 16 - i16::from(entry.y);
                if entry.y_flip() {
                    row = height - 1 - row;
                }
                debug_assert!((0..height).contains(&row));
                let tile = if tall { entry.tile & 0xFE } else { entry.tile };
                self.addr = 0x8000 + u16::from(tile) * 16 + (row as u16) * 2;
                self.entry = Some(entry);
                self.step = SpriteStep::DataLow;
                false
            }
            SpriteStep::DataLow => {
                self.low = vram[usize::from(self.addr - 0x8000)];
                self.step = SpriteStep::DataHigh;
                false
            }
            SpriteStep::DataHigh => {
                let high = vram[usize::from(self.addr + 1 - 0x8000)];
                if let Some(entry) = self.entry {
                    merge_sprite_row(&entry, self.low, high, obj_fifo, cursor);
                }
                true
            }
        }
    }
}

/// Overlay one sprite row on the sprite FIFO.
///
/// Slot 0 of the FIFO lines up with the pixel at `cursor`. Columns left of
/// the cursor (sprites hanging off the left edge) are dropped. A colour 0
/// pixel never lands, and an opaque pixel already queued by an earlier
/// sprite is kept.
fn merge_sprite_row(entry: &OamEntry, low: u8, high: u8, obj_fifo: &mut PixelFifo, cursor: u8) {
    let skip = (usize::from(cursor) + 8).saturating_sub(usize::from(entry.x));
    let source = if entry.uses_obp1() {
        PaletteSource::Obj1
    } else {
        PaletteSource::Obj0
    };

    for column in skip..8 {
        let slot = column - skip;
        while obj_fifo.len() <= slot {
            obj_fifo.push(Pixel::default());
        }

        let bit = if entry.x_flip() {
            column as u8
        } else {
            7 - column as u8
        };
        let color = tile_color(low, high, bit);
        if color == 0 {
            continue;
        }
        if let Some(queued) = obj_fifo.get_mut(slot) {
            if queued.color == 0 {
                *queued = Pixel {
                    color,
                    source,
                    behind_bg: entry.behind_bg(),
                };
            }
        }
    }
}
