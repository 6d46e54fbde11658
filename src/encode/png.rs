use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig, check_order, check_size};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{IntroError, IntroResult};
use crate::render::FrameRGBA;

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    /// Path of frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }

    /// Files written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create png directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> IntroResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| IntroError::encode("png sink not started"))?;
        check_order(self.last_idx, idx)?;
        check_size(cfg, frame)?;
        self.last_idx = Some(idx);
        write_png(&self.frame_path(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> IntroResult<()> {
        self.cfg = None;
        Ok(())
    }
}

/// Encode `frame` as a straight-alpha RGBA PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> IntroResult<()> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| IntroError::encode("frame data length is not width*height*4"))?;
    crate::encode::ensure_parent_dir(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
