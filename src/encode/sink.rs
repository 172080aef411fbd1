use crate::animation::frame::OutputFrame;
use crate::foundation::core::Rect;
use crate::foundation::error::{ConvertError, ConvertResult};

/// Configuration provided to an [`AnimationSink`] before any frame is pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Overall canvas rectangle every frame covers.
    pub canvas: Rect,
    /// Number of frames that will follow.
    pub frame_count: usize,
    /// Repeat count; `None` or `Some(0)` loops forever.
    pub loop_count: Option<u16>,
}

/// Sink contract for consuming composed frames.
///
/// Ordering contract: `push_frame` is called once per frame in input order, between a single
/// `begin` and a single `end`.
pub trait AnimationSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ConvertResult<()>;
    /// Push one frame in animation order.
    fn push_frame(&mut self, frame: &OutputFrame) -> ConvertResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ConvertResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<OutputFrame>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[OutputFrame] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ConvertResult<()> {
        self.frames = Vec::with_capacity(cfg.frame_count);
        self.cfg = Some(cfg);
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &OutputFrame) -> ConvertResult<()> {
        if self.cfg.is_none() {
            return Err(ConvertError::validation("push_frame called before begin"));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> ConvertResult<()> {
        self.finished = true;
        Ok(())
    }
}
