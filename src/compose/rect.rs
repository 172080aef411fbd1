use crate::animation::frame::SourceFrame;
use crate::foundation::core::Rect;
use crate::foundation::error::{ConvertError, ConvertResult};

/// Absolute placement rectangle of a frame: `(x, y, x + width, y + height)`.
pub fn frame_rect(frame: &SourceFrame) -> ConvertResult<Rect> {
    frame.rect()
}

/// Union of every frame's placement rectangle.
///
/// Callers guard against empty input; an empty list is reported as a validation error.
pub fn compute_canvas_rect(frames: &[SourceFrame]) -> ConvertResult<Rect> {
    if frames.is_empty() {
        return Err(ConvertError::validation(
            "cannot compute a canvas rectangle for zero frames",
        ));
    }
    frames
        .iter()
        .try_fold(Rect::default(), |full, f| Ok(full.union(frame_rect(f)?)))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/rect.rs"]
mod tests;
