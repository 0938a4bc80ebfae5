/// Which palette register colours a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PaletteSource {
    #[default]
    Background,
    Obj0,
    Obj1,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pixel {
    /// 2-bit colour index before palette lookup.
    pub(crate) color: u8,
    pub(crate) source: PaletteSource,
    /// OBJ-to-BG priority attribute; only meaningful for sprite pixels.
    pub(crate) behind_bg: bool,
}

impl Pixel {
    pub(crate) fn background(color: u8) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

pub(crate) const FIFO_CAPACITY: usize = 16;

/// Fixed-size ring buffer of pending pixels.
#[derive(Clone, Debug, Default)]
pub(crate) struct PixelFifo {
    pixels: [Pixel; FIFO_CAPACITY],
    head: usize,
    len: usize,
}

impl PixelFifo {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub(crate) fn push(&mut self, pixel: Pixel) {
        debug_assert!(self.len < FIFO_CAPACITY, "pixel FIFO overflow");
        let tail = (self.head + self.len) % FIFO_CAPACITY;
        self.pixels[tail] = pixel;
        self.len += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<Pixel> {
        if self.is_empty() {
            return None;
        }
        let pixel = self.pixels[self.head];
        self.head = (self.head + 1) % FIFO_CAPACITY;
        self.len -= 1;
        Some(pixel)
    }

    /// Mutable access to the `index`-th queued pixel from the front.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Pixel> {
        if index >= self.len {
            return None;
        }
        Some(&mut self.pixels[(self.head + index) % FIFO_CAPACITY])
    }
}
