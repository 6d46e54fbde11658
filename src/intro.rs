//! Frame-driven host integration.
//!
//! [`MatrixIntro`] glues the [`PhaseSequencer`] to a host: it owns the frame scheduler, keeps
//! at most one frame callback pending, replays each step's commands onto the surface it is
//! handed and reacts to resizes by restarting the whole sequence.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::IntroConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{IntroError, IntroResult};
use crate::layout::Grid;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::sequencer::phase::PhaseKind;
use crate::sequencer::{PhaseSequencer, Progress};
use crate::surface::{DrawCommand, DrawSurface, apply_all};
use crate::timing::clock::Clock;

/// The intro animation bound to a scheduler and clock.
pub struct MatrixIntro<S: FrameScheduler, C: Clock> {
    sequencer: PhaseSequencer<C>,
    scheduler: S,
    pending: Option<FrameHandle>,
    surface_size: Canvas,
    grid: Grid,
    rng: StdRng,
    commands: Vec<DrawCommand>,
    paused: bool,
    started: bool,
}

impl<S: FrameScheduler, C: Clock> MatrixIntro<S, C> {
    /// Validate `config` and size the grid for `surface_size`. Noise is seeded from the OS.
    pub fn new(
        config: IntroConfig,
        surface_size: Canvas,
        scheduler: S,
        clock: C,
    ) -> IntroResult<Self> {
        Self::with_rng(config, surface_size, scheduler, clock, StdRng::from_entropy())
    }

    /// Like [`MatrixIntro::new`] with a fixed noise seed, for reproducible renders.
    pub fn with_seed(
        config: IntroConfig,
        surface_size: Canvas,
        scheduler: S,
        clock: C,
        seed: u64,
    ) -> IntroResult<Self> {
        Self::with_rng(
            config,
            surface_size,
            scheduler,
            clock,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        config: IntroConfig,
        surface_size: Canvas,
        scheduler: S,
        clock: C,
        rng: StdRng,
    ) -> IntroResult<Self> {
        if surface_size.width == 0 || surface_size.height == 0 {
            return Err(IntroError::validation(format!(
                "surface must be non-empty, got {}x{}",
                surface_size.width, surface_size.height
            )));
        }
        let grid = Grid::for_surface(surface_size, config.animation.glyph_size);
        let sequencer = PhaseSequencer::new(config, clock)?;
        Ok(Self {
            sequencer,
            scheduler,
            pending: None,
            surface_size,
            grid,
            rng,
            commands: Vec::new(),
            paused: false,
            started: false,
        })
    }

    /// Enter phase 0 with a fresh timer and request the first frame. Later calls only re-arm
    /// the frame callback when none is pending.
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            self.sequencer.restart();
        }
        if self.pending.is_none() {
            self.request();
        }
    }

    fn request(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Frame callback. Returns `false` when `handle` is not the pending one (stale or
    /// cancelled) and nothing was done.
    pub fn on_frame<D: DrawSurface + ?Sized>(
        &mut self,
        handle: FrameHandle,
        surface: &mut D,
    ) -> IntroResult<bool> {
        if self.pending != Some(handle) {
            return Ok(false);
        }
        self.pending = None;

        self.commands.clear();
        let progress = self.sequencer.step(
            handle.0,
            self.grid,
            self.surface_size,
            &*surface,
            &mut self.rng,
            &mut self.commands,
        );
        if progress == Progress::Restarted {
            tracing::debug!(frame = handle.0, "sequence restarted");
        }
        // Re-arm before replaying so a failing surface does not stall the animation.
        self.request();
        apply_all(&self.commands, surface)?;
        Ok(true)
    }

    /// Adapt to a new surface size: drop the pending frame, rebuild the grid and start over.
    pub fn on_resize(&mut self, width: u32, height: u32) -> IntroResult<()> {
        if width == 0 || height == 0 {
            return Err(IntroError::validation(format!(
                "surface must be non-empty, got {width}x{height}"
            )));
        }
        self.cancel_pending();
        self.surface_size = Canvas { width, height };
        let glyph_size = self.sequencer.config().animation.glyph_size;
        self.grid = Grid::for_surface(self.surface_size, glyph_size);
        self.sequencer.restart();
        self.paused = false;
        self.started = true;
        self.request();
        tracing::info!(
            width,
            height,
            rows = self.grid.rows,
            cols = self.grid.cols,
            "resized, restarting intro"
        );
        Ok(())
    }

    /// Freeze the phase timer and drop the pending frame.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.sequencer.timer_mut().stop();
        self.cancel_pending();
    }

    /// Resume the phase timer from where it was frozen and request a frame.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.sequencer.timer_mut().start();
        self.start();
    }

    /// `true` between [`MatrixIntro::pause`] and [`MatrixIntro::resume`].
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current phase identity.
    pub fn phase(&self) -> PhaseKind {
        self.sequencer.phase()
    }

    /// Current matrix grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Surface size the grid was computed for.
    pub fn surface_size(&self) -> Canvas {
        self.surface_size
    }

    /// Frame callback currently awaited.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Completed matrix/failure loops.
    pub fn loops(&self) -> u64 {
        self.sequencer.loops()
    }

    /// Underlying sequencer.
    pub fn sequencer(&self) -> &PhaseSequencer<C> {
        &self.sequencer
    }

    /// Underlying scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler, for hosts that fire callbacks themselves.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
#[path = "../tests/unit/intro.rs"]
mod tests;
