use rand::Rng;

use crate::config::IntroConfig;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::layout::{Grid, MatrixLayoutEngine};
use crate::sequencer::banner::FailureBanner;
use crate::sequencer::plan::PhaseDescriptor;
use crate::surface::{DrawCommand, TextMeasure, TextStyle};
use crate::symbol::Symbol;

/// Coarse phase identity, for status and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Static message with blinking cursor.
    Blink,
    /// Typewriter message.
    Type,
    /// Digit matrix.
    Matrix,
    /// "System failure" banner.
    Failure,
}

/// Live state of the current phase. Toggle flags and counters live here and are only changed
/// by [`PhaseState::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum PhaseState {
    /// Static message with a blinking cursor.
    Blink {
        /// Message left of the cursor.
        message: String,
        /// Phase length in milliseconds.
        duration_ms: f64,
        /// Cursor drawn on the next repaint.
        cursor_visible: bool,
    },
    /// Typewriter reveal.
    Type {
        /// Full message.
        message: String,
        /// Chars typed so far; runs one past the message length before completing.
        typed: usize,
    },
    /// Digit matrix.
    Matrix,
    /// Failure banner following an exhausted matrix.
    Failure {
        /// Banner drawn on the next repaint.
        banner_visible: bool,
    },
}

impl PhaseState {
    /// Initial state for a plan entry.
    pub fn enter(desc: &PhaseDescriptor) -> Self {
        match desc {
            PhaseDescriptor::Blink {
                message,
                duration_ms,
            } => Self::Blink {
                message: message.clone(),
                duration_ms: *duration_ms,
                cursor_visible: false,
            },
            PhaseDescriptor::Type { message } => Self::Type {
                message: message.clone(),
                typed: 0,
            },
            PhaseDescriptor::Matrix => Self::Matrix,
        }
    }

    /// Coarse identity.
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Blink { .. } => PhaseKind::Blink,
            Self::Type { .. } => PhaseKind::Type,
            Self::Matrix => PhaseKind::Matrix,
            Self::Failure { .. } => PhaseKind::Failure,
        }
    }

    /// Advance by one frame callback.
    ///
    /// Draw commands for this frame are appended to `out`; the returned transition takes
    /// effect from the next frame on.
    pub fn step<R: Rng, M: TextMeasure + ?Sized>(
        self,
        ev: &FrameEvent,
        ctx: &mut StepContext<'_, R, M>,
        out: &mut Vec<DrawCommand>,
    ) -> Transition {
        let config = ctx.config;
        let script = &config.script;
        match self {
            Self::Blink {
                message,
                duration_ms,
                cursor_visible,
            } => {
                if ev.elapsed_ms >= duration_ms {
                    return Transition::Advance;
                }
                if !ev.is_gated(script.blink_gate) {
                    return Transition::Stay(Self::Blink {
                        message,
                        duration_ms,
                        cursor_visible,
                    });
                }
                message_frame(&message, cursor_visible, ctx, out);
                Transition::Stay(Self::Blink {
                    message,
                    duration_ms,
                    cursor_visible: !cursor_visible,
                })
            }
            Self::Type { message, typed } => {
                if !ev.is_gated(script.type_gate) {
                    return Transition::Stay(Self::Type { message, typed });
                }
                let len = message.chars().count();
                if typed > len {
                    return Transition::Advance;
                }
                let typed = typed + 1;
                let shown: String = message.chars().take(typed).collect();
                message_frame(&shown, true, ctx, out);
                Transition::Stay(Self::Type { message, typed })
            }
            Self::Matrix => {
                if !ev.is_gated(config.animation.frame_gate) {
                    return Transition::Stay(Self::Matrix);
                }
                let laid_out = ctx.engine.layout_into(
                    ev.elapsed_ms,
                    ctx.grid,
                    &mut *ctx.rng,
                    &mut *ctx.symbols,
                );
                if !laid_out {
                    return Transition::Stay(Self::Failure {
                        banner_visible: true,
                    });
                }
                let size = f64::from(config.animation.glyph_size);
                let fg = config.palette.foreground;
                out.reserve(ctx.symbols.len() + 1);
                out.push(DrawCommand::Clear(config.palette.background));
                out.extend(ctx.symbols.iter().map(|s| s.to_command(size, fg)));
                Transition::Stay(Self::Matrix)
            }
            Self::Failure { banner_visible } => {
                if !ev.is_gated(config.banner.gate) {
                    return Transition::Stay(Self::Failure { banner_visible });
                }
                FailureBanner::new(&config.banner, &config.palette).commands(
                    ctx.surface,
                    banner_visible,
                    out,
                );
                if ev.elapsed_ms > config.animation.loop_duration_ms() {
                    return Transition::Restart;
                }
                Transition::Stay(Self::Failure {
                    banner_visible: !banner_visible,
                })
            }
        }
    }
}

/// Inputs of one frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Frame counter (the scheduler handle id of this callback).
    pub frame: u64,
    /// Milliseconds since the current plan phase was entered; the failure banner keeps the
    /// matrix's clock.
    pub elapsed_ms: f64,
}

impl FrameEvent {
    /// `true` on frames where work is done for a gate of `n`.
    pub fn is_gated(&self, n: u64) -> bool {
        n != 0 && self.frame.is_multiple_of(n)
    }
}

/// Shared read-mostly inputs of a step.
pub struct StepContext<'a, R: Rng, M: TextMeasure + ?Sized> {
    /// Validated configuration.
    pub config: &'a IntroConfig,
    /// Layout engine built from `config.animation`.
    pub engine: &'a MatrixLayoutEngine,
    /// Current grid.
    pub grid: Grid,
    /// Current surface size.
    pub surface: Canvas,
    /// Text metrics of the target surface.
    pub measure: &'a M,
    /// Noise source.
    pub rng: &'a mut R,
    /// Scratch buffer reused across matrix frames.
    pub symbols: &'a mut Vec<Symbol>,
}

/// What the sequencer does after a step.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Keep running with the given state.
    Stay(PhaseState),
    /// Enter the next plan phase.
    Advance,
    /// Rebuild the plan and start over from phase 0.
    Restart,
}

fn message_frame<R: Rng, M: TextMeasure + ?Sized>(
    text: &str,
    show_cursor: bool,
    ctx: &StepContext<'_, R, M>,
    out: &mut Vec<DrawCommand>,
) {
    let script = &ctx.config.script;
    let palette = &ctx.config.palette;
    let origin = Point::new(script.text_origin[0], script.text_origin[1]);
    let style = TextStyle::plain(script.text_size, palette.foreground).with_glow(palette.glow);

    out.push(DrawCommand::Clear(palette.background));
    if !text.is_empty() {
        out.push(DrawCommand::FillText {
            text: text.to_owned(),
            origin,
            style,
        });
        out.push(DrawCommand::StrokeText {
            text: text.to_owned(),
            origin,
            style,
        });
    }
    if show_cursor {
        let x = ctx.measure.measure_text(text, script.text_size) + script.cursor_gap;
        let [w, h] = script.cursor_size;
        out.push(DrawCommand::FillRect {
            rect: Rect::new(x, script.cursor_top, x + w, script.cursor_top + h),
            color: palette.foreground,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/phase.rs"]
mod tests;
