//! Offline rendering: drive the intro on a virtual clock and stream frames into a sink.
//!
//! Output frame `i` happens at `i * 1000 / fps` milliseconds and corresponds to exactly one
//! vsync of the [`VsyncScheduler`], so handle ids (and therefore `frame % N` gating) advance by
//! one per output frame.

use crate::config::IntroConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{IntroError, IntroResult};
use crate::intro::MatrixIntro;
use crate::render::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::scheduler::VsyncScheduler;
use crate::sequencer::phase::PhaseKind;
use crate::timing::clock::ManualClock;

/// Output parameters of a [`RenderSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Noise seed; equal seeds give identical frames.
    pub seed: u64,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: Fps { num: 60, den: 1 },
            seed: 0,
        }
    }
}

/// Summary of a [`RenderSession::render_range`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_out: u64,
    /// Frames simulated without output to reach the range start.
    pub frames_skipped: u64,
    /// Completed matrix loops at the end of the range.
    pub loops: u64,
}

/// Deterministic offline host for [`MatrixIntro`].
pub struct RenderSession {
    config: IntroConfig,
    opts: RenderSessionOpts,
    clock: ManualClock,
    intro: MatrixIntro<VsyncScheduler, ManualClock>,
    surface: CpuSurface,
    next_frame: u64,
}

impl RenderSession {
    /// Validate inputs and position the session before frame 0.
    pub fn new(
        config: IntroConfig,
        opts: RenderSessionOpts,
        font_bytes: Vec<u8>,
    ) -> IntroResult<Self> {
        let surface = CpuSurface::new(opts.width, opts.height, font_bytes)?;
        let clock = ManualClock::new();
        let intro = Self::build_intro(&config, &opts, &clock)?;
        Ok(Self {
            config,
            opts,
            clock,
            intro,
            surface,
            next_frame: 0,
        })
    }

    fn build_intro(
        config: &IntroConfig,
        opts: &RenderSessionOpts,
        clock: &ManualClock,
    ) -> IntroResult<MatrixIntro<VsyncScheduler, ManualClock>> {
        let mut intro = MatrixIntro::with_seed(
            config.clone(),
            Canvas {
                width: opts.width,
                height: opts.height,
            },
            VsyncScheduler::new(),
            clock.clone(),
            opts.seed,
        )?;
        intro.start();
        Ok(intro)
    }

    /// Start over from frame 0 with a blank surface.
    pub fn rewind(&mut self) -> IntroResult<()> {
        self.clock = ManualClock::new();
        self.intro = Self::build_intro(&self.config, &self.opts, &self.clock)?;
        self.surface.resize(self.opts.width, self.opts.height)?;
        self.next_frame = 0;
        Ok(())
    }

    fn step(&mut self) -> IntroResult<()> {
        self.clock
            .set_ms(self.opts.fps.frame_to_ms(FrameIndex(self.next_frame)));
        for handle in self.intro.scheduler_mut().take_due() {
            self.intro.on_frame(handle, &mut self.surface)?;
        }
        self.next_frame += 1;
        Ok(())
    }

    fn seek(&mut self, frame: FrameIndex) -> IntroResult<u64> {
        if frame.0 < self.next_frame {
            self.rewind()?;
        }
        let skipped = frame.0 - self.next_frame;
        while self.next_frame < frame.0 {
            self.step()?;
        }
        Ok(skipped)
    }

    /// Render frame `frame`. Earlier frames are simulated as needed since the canvas persists.
    pub fn render_frame(&mut self, frame: FrameIndex) -> IntroResult<FrameRGBA> {
        self.seek(frame)?;
        self.step()?;
        Ok(self.surface.snapshot())
    }

    /// Render `range` into `sink` in frame order.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> IntroResult<RenderStats> {
        if range.is_empty() {
            return Err(IntroError::validation("render range must be non-empty"));
        }
        let frames_skipped = self.seek(range.start)?;
        sink.begin(SinkConfig {
            width: self.opts.width,
            height: self.opts.height,
            fps: self.opts.fps,
        })?;
        for idx in range.iter() {
            self.step()?;
            let frame = self.surface.snapshot();
            sink.push_frame(idx, &frame)?;
        }
        sink.end()?;

        let stats = RenderStats {
            frames_out: range.len_frames(),
            frames_skipped,
            loops: self.intro.loops(),
        };
        tracing::info!(
            frames = stats.frames_out,
            loops = stats.loops,
            phase = ?self.intro.phase(),
            "rendered range"
        );
        Ok(stats)
    }

    /// Index of the next frame [`RenderSession::render_range`] would produce without seeking.
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.next_frame)
    }

    /// Phase shown by the last rendered frame.
    pub fn phase(&self) -> PhaseKind {
        self.intro.phase()
    }

    /// Output parameters.
    pub fn opts(&self) -> &RenderSessionOpts {
        &self.opts
    }

    /// The driven intro.
    pub fn intro(&self) -> &MatrixIntro<VsyncScheduler, ManualClock> {
        &self.intro
    }
}
