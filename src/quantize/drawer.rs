use std::fmt::Debug;
use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::math::premultiply;
use crate::quantize::palette::{Palette, nearest_premul};

/// Maps straight-alpha RGBA pixels onto a palette, one index per pixel, row-major.
///
/// Implementations must return exactly `src.width() * src.height()` indices, each a valid
/// position in `palette`.
pub trait Drawer: Debug + Send + Sync {
    fn draw(&self, src: &RgbaImage, palette: &Palette) -> Vec<u8>;
}

/// Built-in drawers, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerKind {
    #[default]
    FloydSteinberg,
    Nearest,
}

pub fn create_drawer(kind: DrawerKind) -> Arc<dyn Drawer> {
    match kind {
        DrawerKind::FloydSteinberg => Arc::new(FloydSteinberg),
        DrawerKind::Nearest => Arc::new(NearestColor),
    }
}

/// Plain nearest-color mapping without error diffusion. Deterministic per pixel.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestColor;

impl Drawer for NearestColor {
    fn draw(&self, src: &RgbaImage, palette: &Palette) -> Vec<u8> {
        let entries = palette.premultiplied();
        src.pixels()
            .map(|px| nearest_premul(&entries, premultiply(px.0).map(i32::from)))
            .collect()
    }
}

/// Floyd-Steinberg error diffusion over all four premultiplied channels.
///
/// Error is carried at 16x scale: 7/16 right, 3/16 below-left, 5/16 below, 1/16 below-right.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloydSteinberg;

impl Drawer for FloydSteinberg {
    fn draw(&self, src: &RgbaImage, palette: &Palette) -> Vec<u8> {
        let entries = palette.premultiplied();
        let (w, h) = (src.width() as usize, src.height() as usize);
        let mut out = Vec::with_capacity(w * h);

        // One column of padding on each side so neighbours never need bounds checks.
        let mut err_curr = vec![[0i32; 4]; w + 2];
        let mut err_next = vec![[0i32; 4]; w + 2];

        for y in 0..h {
            for x in 0..w {
                let px = premultiply(src.get_pixel(x as u32, y as u32).0);
                let mut c = [0i32; 4];
                for k in 0..4 {
                    c[k] = (i32::from(px[k]) + err_curr[x + 1][k] / 16).clamp(0, 255);
                }

                let best = nearest_premul(&entries, c);
                out.push(best);

                let chosen = entries[usize::from(best)];
                for k in 0..4 {
                    let e = c[k] - chosen[k];
                    err_next[x][k] += e * 3;
                    err_next[x + 1][k] += e * 5;
                    err_next[x + 2][k] += e;
                    err_curr[x + 2][k] += e * 7;
                }
            }
            std::mem::swap(&mut err_curr, &mut err_next);
            err_next.iter_mut().for_each(|e| *e = [0; 4]);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/drawer.rs"]
mod tests;
