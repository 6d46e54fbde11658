//! A "falling numbers" matrix intro: a terminal-style typing script, a digit rain that
//! uncovers a target number column by column, and a blinking "System failure" banner, looping.
//!
//! The animation is frame-driven and host-agnostic:
//!
//! - [`MatrixIntro`] receives frame callbacks from a [`FrameScheduler`] and resize events
//! - a [`PhaseSequencer`] turns each callback into [`DrawCommand`]s
//! - commands are replayed onto any [`DrawSurface`] ([`CpuSurface`] renders real pixels)
//! - [`RenderSession`] runs the whole thing offline and streams frames into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Construction-time configuration.
pub mod config;
/// Frame sinks (PNG sequences, MP4 via `ffmpeg`).
pub mod encode;
/// Host driver.
pub mod intro;
/// Column-reveal matrix layout.
pub mod layout;
/// Raster surfaces.
pub mod render;
/// Frame scheduling.
pub mod scheduler;
/// Phase state machine.
pub mod sequencer;
/// Offline rendering session.
pub mod session;
/// Drawing-surface capability.
pub mod surface;
/// Matrix glyphs.
pub mod symbol;
/// Clocks and the phase timer.
pub mod timing;

pub use crate::config::{AnimationConfig, BannerConfig, IntroConfig, Palette, ScriptConfig};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8};
pub use crate::foundation::error::{IntroError, IntroResult};
pub use crate::intro::MatrixIntro;
pub use crate::layout::{Grid, Layout, MatrixLayoutEngine};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::scheduler::{FrameHandle, FrameScheduler, VsyncScheduler};
pub use crate::sequencer::phase::{PhaseKind, PhaseState};
pub use crate::sequencer::plan::{PhaseDescriptor, PhasePlan};
pub use crate::sequencer::{PhaseSequencer, Progress};
pub use crate::session::{RenderSession, RenderSessionOpts, RenderStats};
pub use crate::surface::{
    DrawCommand, DrawSurface, Glow, RecordingSurface, TextAlign, TextMeasure, TextStyle,
};
pub use crate::symbol::Symbol;
pub use crate::timing::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::timing::timer::Timer;
