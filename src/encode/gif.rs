use std::borrow::Cow;
use std::io::Write;

use crate::animation::frame::{GifDisposal, OutputFrame};
use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::error::{ConvertError, ConvertResult};

/// GIF container sink.
///
/// The logical screen spans `(0, 0)` to the canvas' max corner and every frame is placed at
/// the canvas origin with its own local color table. Palette index 0 is written as the
/// transparent color.
pub struct GifSink<W: Write> {
    writer: Option<W>,
    encoder: Option<gif::Encoder<W>>,
    cfg: Option<SinkConfig>,
    pushed: usize,
}

impl<W: Write> GifSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            encoder: None,
            cfg: None,
            pushed: 0,
        }
    }

    /// Finish the stream (if not done yet) and return the underlying writer.
    pub fn into_inner(mut self) -> ConvertResult<W> {
        if let Some(enc) = self.encoder.take() {
            return enc.into_inner().map_err(encoding_err);
        }
        self.writer
            .take()
            .ok_or_else(|| ConvertError::encoding("gif sink has no writer"))
    }
}

impl<W: Write> AnimationSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> ConvertResult<()> {
        let screen_w = screen_dim(cfg.canvas.x1, "width")?;
        let screen_h = screen_dim(cfg.canvas.y1, "height")?;
        if cfg.canvas.x0 < 0 || cfg.canvas.y0 < 0 {
            return Err(ConvertError::encoding(
                "gif frames cannot start at negative coordinates",
            ));
        }

        let writer = self
            .writer
            .take()
            .ok_or_else(|| ConvertError::encoding("gif sink already started"))?;
        let mut enc = gif::Encoder::new(writer, screen_w, screen_h, &[]).map_err(encoding_err)?;

        let repeat = match cfg.loop_count {
            None | Some(0) => gif::Repeat::Infinite,
            Some(n) => gif::Repeat::Finite(n),
        };
        enc.set_repeat(repeat).map_err(encoding_err)?;

        self.encoder = Some(enc);
        self.cfg = Some(cfg);
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &OutputFrame) -> ConvertResult<()> {
        let (Some(enc), Some(cfg)) = (self.encoder.as_mut(), self.cfg.as_ref()) else {
            return Err(ConvertError::encoding("push_frame called before begin"));
        };
        let img = &frame.image;
        if img.rect != cfg.canvas {
            return Err(ConvertError::encoding(format!(
                "frame rect {:?} does not match canvas {:?}",
                img.rect, cfg.canvas
            )));
        }
        if img.palette.is_empty() || img.palette.len() > 256 {
            return Err(ConvertError::encoding(format!(
                "gif palettes hold 1..=256 colors, got {}",
                img.palette.len()
            )));
        }
        if let Some(&bad) = img
            .indices
            .iter()
            .find(|&&i| usize::from(i) >= img.palette.len())
        {
            return Err(ConvertError::encoding(format!(
                "pixel index {bad} is outside the {}-color palette",
                img.palette.len()
            )));
        }

        let out = gif::Frame {
            left: img.rect.x0 as u16,
            top: img.rect.y0 as u16,
            width: img.width() as u16,
            height: img.height() as u16,
            delay: u16::try_from(frame.delay_centis).unwrap_or(u16::MAX),
            dispose: disposal_method(frame.disposal),
            transparent: Some(0),
            palette: Some(img.palette.to_rgb_bytes()),
            buffer: Cow::Borrowed(img.indices.as_slice()),
            ..gif::Frame::default()
        };
        enc.write_frame(&out).map_err(encoding_err)?;
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> ConvertResult<()> {
        let Some(cfg) = self.cfg.as_ref() else {
            return Err(ConvertError::encoding("end called before begin"));
        };
        if self.pushed != cfg.frame_count {
            return Err(ConvertError::encoding(format!(
                "expected {} frames, got {}",
                cfg.frame_count, self.pushed
            )));
        }
        if let Some(enc) = self.encoder.take() {
            self.writer = Some(enc.into_inner().map_err(encoding_err)?);
        }
        Ok(())
    }
}

pub(crate) fn disposal_method(d: GifDisposal) -> gif::DisposalMethod {
    match d {
        GifDisposal::NoDisposal => gif::DisposalMethod::Keep,
        GifDisposal::RestoreBackground => gif::DisposalMethod::Background,
        GifDisposal::RestorePrevious => gif::DisposalMethod::Previous,
    }
}

fn screen_dim(v: i32, what: &str) -> ConvertResult<u16> {
    u16::try_from(v)
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| ConvertError::encoding(format!("gif screen {what} {v} is out of range")))
}

fn encoding_err(err: impl std::fmt::Display) -> ConvertError {
    ConvertError::encoding(err.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
