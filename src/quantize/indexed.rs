use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::quantize::palette::Palette;

/// Paletted image covering `rect` in absolute coordinates, one index per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    pub rect: Rect,
    pub palette: Palette,
    pub indices: Vec<u8>,
}

impl IndexedImage {
    /// All-zero image over `rect`.
    pub fn new(rect: Rect, palette: Palette) -> Self {
        Self {
            rect,
            palette,
            indices: vec![0; rect.area()],
        }
    }

    pub fn from_indices(rect: Rect, palette: Palette, indices: Vec<u8>) -> ConvertResult<Self> {
        if indices.len() != rect.area() {
            return Err(ConvertError::validation(format!(
                "indexed image expects {} indices, got {}",
                rect.area(),
                indices.len()
            )));
        }
        Ok(Self {
            rect,
            palette,
            indices,
        })
    }

    pub fn width(&self) -> u32 {
        self.rect.width()
    }

    pub fn height(&self) -> u32 {
        self.rect.height()
    }

    fn offset(&self, p: Point) -> Option<usize> {
        if !self.rect.contains(p) {
            return None;
        }
        let x = (p.x - self.rect.x0) as usize;
        let y = (p.y - self.rect.y0) as usize;
        Some(y * self.width() as usize + x)
    }

    pub fn index_at(&self, p: Point) -> Option<u8> {
        self.offset(p).map(|o| self.indices[o])
    }

    pub fn set_index(&mut self, p: Point, idx: u8) {
        if let Some(o) = self.offset(p) {
            self.indices[o] = idx;
        }
    }

    /// Palette color at `p`. `None` outside the rect or for an out-of-palette index.
    pub fn color_at(&self, p: Point) -> Option<[u8; 4]> {
        self.index_at(p).and_then(|i| self.palette.get(i))
    }
}
