use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_order, check_size};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{IntroError, IntroResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file, usually `.mp4`.
    pub out_path: PathBuf,
    /// Replace an existing output file.
    pub overwrite: bool,
    /// Opaque color that transparent pixels are flattened onto.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    /// Overwriting options with a black background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::BLACK,
        }
    }
}

/// Streams raw RGBA frames into a system `ffmpeg` encoding H.264/yuv420p.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create an idle sink; `ffmpeg` is spawned by `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    fn command(&self, cfg: &SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if self.opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
            .args(["-r", &format!("{}/{}", cfg.fps.num, cfg.fps.den)])
            .args(["-i", "pipe:0", "-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(&self.opts.out_path);
        cmd
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(IntroError::validation("ffmpeg output must be non-empty"));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(IntroError::validation(format!(
                "ffmpeg output needs even dimensions for yuv420p, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(IntroError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(IntroError::encode("ffmpeg was not found on PATH"));
        }

        let mut child = self
            .command(&cfg)
            .spawn()
            .map_err(|e| IntroError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| IntroError::encode("ffmpeg stdin unavailable"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| IntroError::encode("ffmpeg stderr unavailable"))?;
        let drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });
        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "spawned ffmpeg"
        );

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> IntroResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| IntroError::encode("ffmpeg sink not started"))?;
        check_order(self.last_idx, idx)?;
        check_size(cfg, frame)?;
        self.last_idx = Some(idx);

        if frame.premultiplied {
            let bg = self.opts.background;
            flatten_premul_over_bg(&mut self.scratch, &frame.data, [bg.r, bg.g, bg.b, 255]);
        } else {
            self.scratch.copy_from_slice(&frame.data);
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| IntroError::encode("ffmpeg sink already finished"))?;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| IntroError::encode(format!("write frame {} to ffmpeg: {e}", idx.0)))
    }

    fn end(&mut self) -> IntroResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| IntroError::encode("ffmpeg sink not started"))?;
        let status = child
            .wait()
            .map_err(|e| IntroError::encode(format!("wait for ffmpeg: {e}")))?;
        let stderr = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| IntroError::encode("ffmpeg stderr drain panicked"))?
                .map_err(|e| IntroError::encode(format!("read ffmpeg stderr: {e}")))?,
            None => Vec::new(),
        };
        self.cfg = None;

        if !status.success() {
            return Err(IntroError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        Ok(())
    }
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
