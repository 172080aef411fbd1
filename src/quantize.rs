//! Reduction of a canvas region to an indexed image whose palette slot 0 is transparent.

pub(crate) mod drawer;
pub(crate) mod indexed;
pub(crate) mod palette;

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{ConvertError, ConvertResult};
use drawer::{Drawer, DrawerKind, create_drawer};
use indexed::IndexedImage;
use palette::{MAX_PALETTE_LEN, Palette};

/// Quantization settings.
#[derive(Clone, Debug)]
pub struct QuantizeOpts {
    /// Maximum palette size. Values outside `1..=256` mean 256.
    pub num_colors: usize,
    /// Pixel-to-index strategy. `None` means Floyd-Steinberg.
    pub drawer: Option<Arc<dyn Drawer>>,
}

impl Default for QuantizeOpts {
    fn default() -> Self {
        Self {
            num_colors: MAX_PALETTE_LEN,
            drawer: None,
        }
    }
}

impl QuantizeOpts {
    pub fn new(num_colors: usize, drawer: DrawerKind) -> Self {
        Self {
            num_colors,
            drawer: Some(create_drawer(drawer)),
        }
    }

    pub fn effective_num_colors(&self) -> usize {
        if (1..=MAX_PALETTE_LEN).contains(&self.num_colors) {
            self.num_colors
        } else {
            MAX_PALETTE_LEN
        }
    }

    fn resolved_drawer(&self) -> Arc<dyn Drawer> {
        self.drawer
            .clone()
            .unwrap_or_else(|| create_drawer(DrawerKind::FloydSteinberg))
    }
}

/// Image handed to [`quantize`].
#[derive(Clone, Copy, Debug)]
pub enum SourceImage<'a> {
    /// Straight-alpha RGBA whose top-left pixel sits at `origin`.
    Rgba { image: &'a RgbaImage, origin: Point },
    /// Already-paletted image.
    Indexed(&'a IndexedImage),
}

impl SourceImage<'_> {
    fn bounds(&self) -> Rect {
        match self {
            SourceImage::Rgba { image, origin } => Rect::new(
                origin.x,
                origin.y,
                origin.x.saturating_add(image.width() as i32),
                origin.y.saturating_add(image.height() as i32),
            ),
            SourceImage::Indexed(img) => img.rect,
        }
    }

    fn color_at(&self, p: Point) -> [u8; 4] {
        match self {
            SourceImage::Rgba { image, origin } => image
                .get_pixel((p.x - origin.x) as u32, (p.y - origin.y) as u32)
                .0,
            SourceImage::Indexed(img) => img.color_at(p).unwrap_or(palette::TRANSPARENT),
        }
    }
}

/// Produce an indexed image over `rect` from `src`.
///
/// An indexed source whose palette fits in the requested size keeps its palette and indices.
/// Anything else is mapped onto the first `num_colors` entries of the Plan 9 palette through
/// the configured drawer. Either way palette slot 0 ends up fully transparent, so pixels that
/// landed on slot 0 become transparent. Pixels of `rect` outside the source stay at index 0.
pub fn quantize(
    src: SourceImage<'_>,
    rect: Rect,
    opts: &QuantizeOpts,
) -> ConvertResult<IndexedImage> {
    if rect.is_empty() {
        return Err(ConvertError::validation(
            "quantize target rectangle must not be empty",
        ));
    }
    let num_colors = opts.effective_num_colors();
    let overlap = rect.intersect(src.bounds());

    if let SourceImage::Indexed(p) = src
        && p.palette.len() <= num_colors
    {
        let mut out = IndexedImage::new(rect, p.palette.clone());
        for y in overlap.y0..overlap.y1 {
            for x in overlap.x0..overlap.x1 {
                let pt = Point::new(x, y);
                if let Some(idx) = p.index_at(pt) {
                    out.set_index(pt, idx);
                }
            }
        }
        out.palette.force_transparent_slot0();
        return Ok(out);
    }

    // Slot 0 is made transparent before drawing so that transparent canvas pixels map onto it.
    let mut pal = Palette::plan9_prefix(num_colors);
    pal.force_transparent_slot0();

    let mut region = RgbaImage::new(rect.width(), rect.height());
    for y in overlap.y0..overlap.y1 {
        for x in overlap.x0..overlap.x1 {
            let c = src.color_at(Point::new(x, y));
            region.put_pixel((x - rect.x0) as u32, (y - rect.y0) as u32, Rgba(c));
        }
    }

    let indices = opts.resolved_drawer().draw(&region, &pal);
    let mut out = IndexedImage::from_indices(rect, pal, indices)?;
    out.palette.force_transparent_slot0();
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/quantize/quantize.rs"]
mod tests;
