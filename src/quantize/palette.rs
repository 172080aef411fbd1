use crate::foundation::math::premultiply;

/// Maximum number of entries an indexed frame may carry.
pub const MAX_PALETTE_LEN: usize = 256;

/// Fully transparent palette entry; slot 0 of every output palette holds it.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Ordered list of straight-alpha RGBA8 colors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    pub fn new(colors: Vec<[u8; 4]>) -> Self {
        Self { colors }
    }

    /// The fixed 256-color Plan 9 reference palette (`rgbv`): a 4x4x4 RGB cube with four
    /// intensity levels per cell, ordered so that any prefix is a reasonable spread.
    pub fn plan9() -> Self {
        let mut colors = vec![[0u8, 0, 0, 255]; MAX_PALETTE_LEN];
        let mut i = 0i32;
        for r in 0..4i32 {
            for v in 0..4i32 {
                let mut j = v - r;
                for g in 0..4i32 {
                    for b in 0..4i32 {
                        let den = r.max(g).max(b);
                        let rgb = if den == 0 {
                            let c = (0x11 * v) as u8;
                            [c, c, c]
                        } else {
                            let num = 17 * (4 * den + v);
                            [
                                (r * num / den) as u8,
                                (g * num / den) as u8,
                                (b * num / den) as u8,
                            ]
                        };
                        colors[(i + (j & 0x0f)) as usize] = [rgb[0], rgb[1], rgb[2], 255];
                        j += 1;
                    }
                }
                i += 16;
            }
        }
        Self { colors }
    }

    /// First `n` entries of [`Palette::plan9`], `n` clamped to `1..=256`.
    pub fn plan9_prefix(n: usize) -> Self {
        let mut p = Self::plan9();
        p.colors.truncate(n.clamp(1, MAX_PALETTE_LEN));
        p
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    pub fn get(&self, idx: u8) -> Option<[u8; 4]> {
        self.colors.get(usize::from(idx)).copied()
    }

    /// Overwrite slot 0 with [`TRANSPARENT`], growing an empty palette to one entry.
    pub fn force_transparent_slot0(&mut self) {
        match self.colors.first_mut() {
            Some(c) => *c = TRANSPARENT,
            None => self.colors.push(TRANSPARENT),
        }
    }

    /// Entries in premultiplied form, the space in which distances are measured.
    pub(crate) fn premultiplied(&self) -> Vec<[i32; 4]> {
        self.colors
            .iter()
            .map(|&c| premultiply(c).map(i32::from))
            .collect()
    }

    /// Index of the closest entry to a straight RGBA color. Ties resolve to the lowest index.
    pub fn nearest(&self, color: [u8; 4]) -> u8 {
        nearest_premul(&self.premultiplied(), premultiply(color).map(i32::from))
    }

    /// Flat `r,g,b` triples, as GIF color tables expect.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|c| [c[0], c[1], c[2]])
            .collect()
    }
}

/// Nearest entry by squared distance over all four premultiplied channels.
pub(crate) fn nearest_premul(entries: &[[i32; 4]], c: [i32; 4]) -> u8 {
    let mut best = 0usize;
    let mut best_d = i64::MAX;
    for (i, e) in entries.iter().enumerate() {
        let d: i64 = (0..4)
            .map(|k| {
                let dk = i64::from(c[k] - e[k]);
                dk * dk
            })
            .sum();
        if d < best_d {
            best = i;
            best_d = d;
            if d == 0 {
                break;
            }
        }
    }
    best as u8
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/palette.rs"]
mod tests;
