use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::BannerResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels at the start of the run.
    pub width: u32,
    /// Frame height in pixels at the start of the run.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in tick order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()>;
    /// Push one frame in strictly increasing tick order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()>;
    /// Called once after the last frame is pushed, including after teardown.
    fn end(&mut self) -> BannerResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BannerResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Sink that discards frames; useful for simulation-only runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BannerResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> BannerResult<()> {
        Ok(())
    }

    fn end(&mut self) -> BannerResult<()> {
        Ok(())
    }
}
