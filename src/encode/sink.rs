use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{IntroError, IntroResult};
use crate::render::FrameRGBA;

/// Stream parameters handed to [`FrameSink::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing [`FrameIndex`] values between one `begin`
/// and its `end`.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()>;
    /// Accept one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> IntroResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> IntroResult<()>;
}

/// Sink that keeps every frame, for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured by `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> IntroResult<()> {
        check_order(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> IntroResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Reject a frame index that does not follow `last`.
pub(crate) fn check_order(last: Option<FrameIndex>, idx: FrameIndex) -> IntroResult<()> {
    match last {
        Some(last) if idx.0 <= last.0 => Err(IntroError::encode(format!(
            "out-of-order frame {} after {}",
            idx.0, last.0
        ))),
        _ => Ok(()),
    }
}

/// Reject a frame whose size does not match the stream.
pub(crate) fn check_size(cfg: &SinkConfig, frame: &FrameRGBA) -> IntroResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(IntroError::encode(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
        return Err(IntroError::encode("frame data length is not width*height*4"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
