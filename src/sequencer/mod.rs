//! Phase sequencing: blink, typewriter, matrix and failure phases as an explicit state machine.
//!
//! [`PhaseSequencer`] owns the plan, the current [`PhaseState`] and the phase timer. Each
//! frame it builds a [`FrameEvent`], lets the current state produce draw commands and a
//! [`Transition`], and applies that transition. The timer is reset whenever a plan phase is
//! entered; the failure banner keeps running on the matrix's timer so that the restart fires
//! once the whole loop duration has passed.

/// Failure banner geometry and drawing.
pub mod banner;
/// Per-phase state and pure step function.
pub mod phase;
/// Phase plan.
pub mod plan;

use rand::Rng;

use crate::config::IntroConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::IntroResult;
use crate::layout::{Grid, MatrixLayoutEngine};
use crate::surface::{DrawCommand, TextMeasure};
use crate::symbol::Symbol;
use crate::timing::clock::Clock;
use crate::timing::timer::Timer;

use self::phase::{FrameEvent, PhaseKind, PhaseState, StepContext, Transition};
use self::plan::PhasePlan;

/// Observable outcome of one [`PhaseSequencer::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Still in the same plan phase (possibly switched from matrix to failure).
    Stayed,
    /// Entered the next plan phase.
    Advanced,
    /// Started over from phase 0.
    Restarted,
}

/// Restartable phase state machine.
pub struct PhaseSequencer<C: Clock> {
    config: IntroConfig,
    engine: MatrixLayoutEngine,
    plan: PhasePlan,
    index: usize,
    state: PhaseState,
    timer: Timer<C>,
    symbols: Vec<Symbol>,
    loops: u64,
}

impl<C: Clock> PhaseSequencer<C> {
    /// Validate `config` and position the sequencer at phase 0.
    pub fn new(config: IntroConfig, clock: C) -> IntroResult<Self> {
        config.validate()?;
        let engine = MatrixLayoutEngine::new(&config.animation);
        let plan = PhasePlan::classic(&config.script, &config.script.timestamp_now());
        let state = plan
            .get(0)
            .map(PhaseState::enter)
            .unwrap_or(PhaseState::Matrix);
        Ok(Self {
            config,
            engine,
            plan,
            index: 0,
            state,
            timer: Timer::new(clock),
            symbols: Vec::new(),
            loops: 0,
        })
    }

    /// Discard progress: rebuild the plan (fresh timestamp) and enter phase 0.
    pub fn restart(&mut self) {
        let stamp = self.config.script.timestamp_now();
        self.plan = PhasePlan::classic(&self.config.script, &stamp);
        self.enter(0);
    }

    fn enter(&mut self, index: usize) {
        let index = if index < self.plan.len() { index } else { 0 };
        self.index = index;
        self.state = self
            .plan
            .get(index)
            .map(PhaseState::enter)
            .unwrap_or(PhaseState::Matrix);
        self.timer.reset();
        tracing::debug!(index, phase = ?self.state.kind(), "entered phase");
    }

    /// Run the current phase for frame `frame`, appending this frame's draw commands to `out`.
    pub fn step<R: Rng, M: TextMeasure + ?Sized>(
        &mut self,
        frame: u64,
        grid: Grid,
        surface: Canvas,
        measure: &M,
        rng: &mut R,
        out: &mut Vec<DrawCommand>,
    ) -> Progress {
        let ev = FrameEvent {
            frame,
            elapsed_ms: self.timer.elapsed_ms(),
        };
        let state = std::mem::replace(&mut self.state, PhaseState::Matrix);
        let was_matrix = state == PhaseState::Matrix;
        let mut ctx = StepContext {
            config: &self.config,
            engine: &self.engine,
            grid,
            surface,
            measure,
            rng,
            symbols: &mut self.symbols,
        };

        match state.step(&ev, &mut ctx, out) {
            Transition::Stay(next) => {
                if was_matrix && next.kind() == PhaseKind::Failure {
                    tracing::debug!(loops = self.loops, "matrix exhausted, showing failure banner");
                }
                self.state = next;
                Progress::Stayed
            }
            Transition::Advance => {
                self.enter(self.index + 1);
                Progress::Advanced
            }
            Transition::Restart => {
                self.loops += 1;
                tracing::info!(loops = self.loops, "loop finished, restarting sequence");
                self.restart();
                Progress::Restarted
            }
        }
    }

    /// Current phase identity.
    pub fn phase(&self) -> PhaseKind {
        self.state.kind()
    }

    /// Current state, including toggle flags and counters.
    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    /// Index of the current plan phase.
    pub fn phase_index(&self) -> usize {
        self.index
    }

    /// The plan being played.
    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    /// Number of completed matrix/failure loops.
    pub fn loops(&self) -> u64 {
        self.loops
    }

    /// Validated configuration.
    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    /// Phase timer.
    pub fn timer(&self) -> &Timer<C> {
        &self.timer
    }

    /// Mutable phase timer, for pause/resume.
    pub fn timer_mut(&mut self) -> &mut Timer<C> {
        &mut self.timer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/sequencer.rs"]
mod tests;
