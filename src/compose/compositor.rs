use crate::animation::frame::{
    BlendOp, ComposedAnimation, DisposeOp, GifDisposal, OutputFrame, SourceFrame,
};
use crate::compose::canvas::CanvasBuffer;
use crate::compose::rect::frame_rect;
use crate::foundation::core::Rect;
use crate::foundation::error::ConvertResult;
use crate::quantize::{QuantizeOpts, quantize};

/// Turns layered frames into self-contained full-canvas frames.
///
/// Owns two buffers over the overall rectangle: `canvas` (what is currently visible) and
/// `backup` (the canvas as it stood after the previous frame's disposal, restored by
/// [`DisposeOp::Previous`]).
#[derive(Debug)]
pub struct Compositor {
    full: Rect,
    canvas: CanvasBuffer,
    backup: CanvasBuffer,
    quantize: QuantizeOpts,
}

impl Compositor {
    pub fn new(full: Rect, quantize: QuantizeOpts) -> Self {
        Self {
            full,
            canvas: CanvasBuffer::new(full),
            backup: CanvasBuffer::new(full),
            quantize,
        }
    }

    pub fn canvas(&self) -> &CanvasBuffer {
        &self.canvas
    }

    pub fn backup(&self) -> &CanvasBuffer {
        &self.backup
    }

    /// Render one frame, emit its full-canvas output, then dispose.
    pub fn push(&mut self, frame: &SourceFrame) -> ConvertResult<OutputFrame> {
        let target = frame_rect(frame)?;

        match frame.blend {
            BlendOp::Source => self.canvas.clear_rect(target),
            BlendOp::Over => {}
        }
        self.canvas.draw_over(&frame.image, frame.offset);

        let image = quantize(self.canvas.as_source(), self.full, &self.quantize)?;
        let out = OutputFrame {
            image,
            delay_centis: frame.delay_centis(),
            disposal: GifDisposal::from(frame.dispose),
        };

        match frame.dispose {
            DisposeOp::None => {}
            DisposeOp::Background => self.canvas.clear_rect(target),
            DisposeOp::Previous => self.canvas.copy_from(&self.backup)?,
        }

        // Backup is taken after disposal, so a later Previous restores this post-disposal state.
        self.backup.copy_from(&self.canvas)?;

        tracing::debug!(
            ?target,
            blend = ?frame.blend,
            dispose = ?frame.dispose,
            delay_centis = out.delay_centis,
            "composed frame"
        );
        Ok(out)
    }
}

/// Composite every frame in order over `full`.
#[tracing::instrument(skip(frames, opts), fields(frames = frames.len()))]
pub fn compose_frames(
    frames: &[SourceFrame],
    full: Rect,
    opts: &QuantizeOpts,
) -> ConvertResult<ComposedAnimation> {
    let mut compositor = Compositor::new(full, opts.clone());
    let frames = frames
        .iter()
        .map(|f| compositor.push(f))
        .collect::<ConvertResult<Vec<_>>>()?;
    Ok(ComposedAnimation {
        canvas: full,
        frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
