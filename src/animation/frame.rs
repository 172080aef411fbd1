use image::RgbaImage;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::ConvertResult;
use crate::quantize::indexed::IndexedImage;

/// How a frame's pixels are combined with the canvas underneath its rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendOp {
    /// Erase the frame rectangle, then draw: the frame replaces those pixels outright.
    Source,
    /// Alpha-composite the frame onto existing canvas content.
    #[default]
    Over,
}

/// Canvas mutation applied after a frame has been displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisposeOp {
    /// Leave the canvas as it is.
    #[default]
    None,
    /// Clear the frame rectangle to fully transparent.
    Background,
    /// Restore the canvas to the state saved after the previous frame's disposal.
    Previous,
}

/// Disposal tag understood by a replace-only output container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GifDisposal {
    NoDisposal,
    RestoreBackground,
    RestorePrevious,
}

impl From<DisposeOp> for GifDisposal {
    fn from(op: DisposeOp) -> Self {
        match op {
            DisposeOp::None => Self::NoDisposal,
            DisposeOp::Background => Self::RestoreBackground,
            DisposeOp::Previous => Self::RestorePrevious,
        }
    }
}

/// One decoded animation frame: a straight-alpha RGBA tile placed at `offset`.
#[derive(Clone, Debug)]
pub struct SourceFrame {
    pub image: RgbaImage,
    pub offset: Point,
    pub blend: BlendOp,
    pub dispose: DisposeOp,
    /// Display duration in seconds.
    pub duration_secs: f64,
}

impl SourceFrame {
    pub fn new(image: RgbaImage, offset: Point) -> Self {
        Self {
            image,
            offset,
            blend: BlendOp::default(),
            dispose: DisposeOp::default(),
            duration_secs: 0.0,
        }
    }

    pub fn with_blend(mut self, blend: BlendOp) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_dispose(mut self, dispose: DisposeOp) -> Self {
        self.dispose = dispose;
        self
    }

    pub fn with_duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Absolute placement rectangle of this frame.
    pub fn rect(&self) -> ConvertResult<Rect> {
        Rect::from_origin_size(self.offset, self.width(), self.height())
    }

    /// Display duration in hundredths of a second, rounded to nearest.
    pub fn delay_centis(&self) -> u32 {
        // Float-to-int `as` saturates: negative and NaN land on 0.
        (self.duration_secs * 100.0).round() as u32
    }
}

/// One fully rendered, palettized output frame.
#[derive(Clone, Debug)]
pub struct OutputFrame {
    pub image: IndexedImage,
    /// Delay in hundredths of a second.
    pub delay_centis: u32,
    pub disposal: GifDisposal,
}

/// Result of compositing: one [`OutputFrame`] per source frame, in input order,
/// each covering the same overall canvas rectangle.
#[derive(Clone, Debug)]
pub struct ComposedAnimation {
    pub canvas: Rect,
    pub frames: Vec<OutputFrame>,
}

impl ComposedAnimation {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn images(&self) -> impl Iterator<Item = &IndexedImage> {
        self.frames.iter().map(|f| &f.image)
    }

    pub fn delays(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.iter().map(|f| f.delay_centis)
    }

    pub fn disposals(&self) -> impl Iterator<Item = GifDisposal> + '_ {
        self.frames.iter().map(|f| f.disposal)
    }

    /// Split into the three parallel sequences consumed by an encoder.
    pub fn into_parts(self) -> (Vec<IndexedImage>, Vec<u32>, Vec<GifDisposal>) {
        let n = self.frames.len();
        let mut images = Vec::with_capacity(n);
        let mut delays = Vec::with_capacity(n);
        let mut disposals = Vec::with_capacity(n);
        for f in self.frames {
            images.push(f.image);
            delays.push(f.delay_centis);
            disposals.push(f.disposal);
        }
        (images, delays, disposals)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frame.rs"]
mod tests;
