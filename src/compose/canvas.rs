use image::{Rgba, RgbaImage};

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::foundation::math::over_straight;
use crate::quantize::SourceImage;

/// Straight-alpha RGBA8 buffer addressed in absolute coordinates over `rect`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasBuffer {
    rect: Rect,
    pixels: RgbaImage,
}

impl CanvasBuffer {
    /// Fully transparent buffer covering `rect`.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            pixels: RgbaImage::new(rect.width(), rect.height()),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, p: Point) -> Option<[u8; 4]> {
        if !self.rect.contains(p) {
            return None;
        }
        let (x, y) = self.local(p);
        Some(self.pixels.get_pixel(x, y).0)
    }

    pub fn as_source(&self) -> SourceImage<'_> {
        SourceImage::Rgba {
            image: &self.pixels,
            origin: self.rect.min(),
        }
    }

    fn local(&self, p: Point) -> (u32, u32) {
        ((p.x - self.rect.x0) as u32, (p.y - self.rect.y0) as u32)
    }

    /// Set every pixel of `r` (clipped to the buffer) to fully transparent.
    pub fn clear_rect(&mut self, r: Rect) {
        let r = r.intersect(self.rect);
        for y in r.y0..r.y1 {
            for x in r.x0..r.x1 {
                let (lx, ly) = self.local(Point::new(x, y));
                self.pixels.put_pixel(lx, ly, Rgba([0, 0, 0, 0]));
            }
        }
    }

    /// Source-over `src` with its top-left pixel at `at`, clipped to the buffer.
    pub fn draw_over(&mut self, src: &RgbaImage, at: Point) {
        let target = Rect::new(
            at.x,
            at.y,
            at.x.saturating_add(src.width() as i32),
            at.y.saturating_add(src.height() as i32),
        )
        .intersect(self.rect);

        for y in target.y0..target.y1 {
            for x in target.x0..target.x1 {
                let s = src.get_pixel((x - at.x) as u32, (y - at.y) as u32).0;
                let (lx, ly) = self.local(Point::new(x, y));
                let d = self.pixels.get_pixel_mut(lx, ly);
                d.0 = over_straight(d.0, s);
            }
        }
    }

    /// Overwrite this buffer with the full contents of `other`.
    pub fn copy_from(&mut self, other: &CanvasBuffer) -> ConvertResult<()> {
        if self.rect != other.rect {
            return Err(ConvertError::validation(format!(
                "canvas copy expects matching rects, got {:?} and {:?}",
                self.rect, other.rect
            )));
        }
        self.pixels.copy_from_slice(other.pixels.as_raw());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
