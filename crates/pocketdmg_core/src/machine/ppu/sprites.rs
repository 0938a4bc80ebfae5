pub(crate) const MAX_SPRITES_PER_LINE: usize = 10;
pub(crate) const OAM_ENTRIES: usize = 40;

/// Decoded OAM entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OamEntry {
    pub(crate) y: u8,
    pub(crate) x: u8,
    pub(crate) tile: u8,
    pub(crate) flags: u8,
}

impl OamEntry {
    pub(crate) fn read(oam: &[u8], index: u8) -> Self {
        let base = usize::from(index) * 4;
        Self {
            y: oam[base],
            x: oam[base + 1],
            tile: oam[base + 2],
            flags: oam[base + 3],
        }
    }

    pub(crate) fn behind_bg(&self) -> bool {
        (self.flags & 0x80) != 0
    }

    pub(crate) fn y_flip(&self) -> bool {
        (self.flags & 0x40) != 0
    }

    pub(crate) fn x_flip(&self) -> bool {
        (self.flags & 0x20) != 0
    }

    pub(crate) fn uses_obp1(&self) -> bool {
        (self.flags & 0x10) != 0
    }

    /// Whether the sprite covers scanline `ly` for the given height.
    pub(crate) fn covers_line(&self, ly: u8, height: u8) -> bool {
        let top = i16::from(self.y) - 16;
        let line = i16::from(ly);
        line >= top && line < top + i16::from(height)
    }
}

/// Sprites picked for one scanline, stored as OAM indices.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineSprites {
    indices: [u8; MAX_SPRITES_PER_LINE],
    /// Cached x so the pixel transfer can test triggers without OAM reads.
    xs: [u8; MAX_SPRITES_PER_LINE],
    count: usize,
    /// Next entry the pixel transfer has not fetched yet.
    next: usize,
}

impl LineSprites {
    pub(crate) fn clear(&mut self) {
        self.count = 0;
        self.next = 0;
    }

    pub(crate) fn is_full(&self) -> bool {
        self.count == MAX_SPRITES_PER_LINE
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn push(&mut self, index: u8, x: u8) {
        debug_assert!(self.count < MAX_SPRITES_PER_LINE, "sprite slot overflow");
        self.indices[self.count] = index;
        self.xs[self.count] = x;
        self.count += 1;
    }

    /// Order by x, then by OAM index. Insertion sort keeps it stable and
    /// entries were pushed in OAM order.
    pub(crate) fn sort_by_x(&mut self) {
        for i in 1..self.count {
            let mut j = i;
            while j > 0 && self.xs[j - 1] > self.xs[j] {
                self.xs.swap(j - 1, j);
                self.indices.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    pub(crate) fn indices(&self) -> &[u8] {
        &self.indices[..self.count]
    }

    /// OAM index of the next sprite whose left edge has been reached by
    /// the pixel at `cursor`.
    pub(crate) fn take_due(&mut self, cursor: u8) -> Option<u8> {
        if self.next >= self.len() {
            return None;
        }
        if u16::from(self.xs[self.next]) <= u16::from(cursor) + 8 {
            let index = self.indices[self.next];
            self.next += 1;
            Some(index)
        } else {
            None
        }
    }

    /// Drop every sprite not yet fetched.
    pub(crate) fn skip_all(&mut self) {
        self.next = self.count;
    }
}
