//! Drawing-surface capability consumed by the intro.
//!
//! The sequencer never touches pixels: every step emits a list of [`DrawCommand`]s which the
//! driver replays onto a [`DrawSurface`]. Surfaces behave like an immediate-mode 2D canvas,
//! so pixels persist between frames until overdrawn.

use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::IntroResult;

/// Horizontal anchoring of text relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Origin is the left edge.
    #[default]
    Left,
    /// Origin is the horizontal center.
    Center,
}

/// Soft halo painted behind text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Glow {
    /// Halo color.
    pub color: Rgba8,
    /// Halo radius in pixels.
    pub radius: f64,
}

/// Text paint parameters. The text origin is on the alphabetic baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f64,
    /// Horizontal anchoring.
    pub align: TextAlign,
    /// Fill or stroke color.
    pub color: Rgba8,
    /// Optional halo.
    pub glow: Option<Glow>,
}

impl TextStyle {
    /// Left-aligned text without glow.
    pub fn plain(size_px: f64, color: Rgba8) -> Self {
        Self {
            size_px,
            align: TextAlign::Left,
            color,
            glow: None,
        }
    }

    /// Same style anchored at the center.
    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    /// Same style with a halo.
    pub fn with_glow(mut self, glow: Option<Glow>) -> Self {
        self.glow = glow;
        self
    }
}

/// Text measurement, needed by steps that place a cursor after typed text.
pub trait TextMeasure {
    /// Advance width of `text` at `size_px`, in pixels.
    fn measure_text(&self, text: &str, size_px: f64) -> f64;
}

/// Immediate-mode 2D drawing surface.
pub trait DrawSurface: TextMeasure {
    /// Current surface size.
    fn size(&self) -> Canvas;
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba8) -> IntroResult<()>;
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> IntroResult<()>;
    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64) -> IntroResult<()>;
    /// Fill `text` anchored at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> IntroResult<()>;
    /// Stroke the glyph outlines of `text` anchored at `origin`.
    fn stroke_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> IntroResult<()>;
}

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(Rgba8),
    /// Fill a rectangle.
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Stroke a rectangle outline.
    StrokeRect {
        /// Target rectangle.
        rect: Rect,
        /// Stroke color.
        color: Rgba8,
        /// Line width in pixels.
        width: f64,
    },
    /// Fill text.
    FillText {
        /// Text to paint.
        text: String,
        /// Baseline anchor.
        origin: Point,
        /// Paint parameters.
        style: TextStyle,
    },
    /// Stroke text outlines.
    StrokeText {
        /// Text to paint.
        text: String,
        /// Baseline anchor.
        origin: Point,
        /// Paint parameters.
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Replay this command onto `surface`.
    pub fn apply<D: DrawSurface + ?Sized>(&self, surface: &mut D) -> IntroResult<()> {
        match self {
            Self::Clear(color) => surface.clear(*color),
            Self::FillRect { rect, color } => surface.fill_rect(*rect, *color),
            Self::StrokeRect { rect, color, width } => surface.stroke_rect(*rect, *color, *width),
            Self::FillText {
                text,
                origin,
                style,
            } => surface.fill_text(text, *origin, style),
            Self::StrokeText {
                text,
                origin,
                style,
            } => surface.stroke_text(text, *origin, style),
        }
    }
}

/// Replay `commands` in order.
pub fn apply_all<D: DrawSurface + ?Sized>(
    commands: &[DrawCommand],
    surface: &mut D,
) -> IntroResult<()> {
    for cmd in commands {
        cmd.apply(surface)?;
    }
    Ok(())
}

/// Surface that only records what was drawn.
///
/// Text is measured as half an em per char.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Canvas,
    /// Commands in the order they were received.
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recorder of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Canvas { width, height },
            commands: Vec::new(),
        }
    }

    /// Change the reported size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Canvas { width, height };
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, size_px: f64) -> f64 {
        text.chars().count() as f64 * size_px * 0.5
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Canvas {
        self.size
    }

    fn clear(&mut self, color: Rgba8) -> IntroResult<()> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> IntroResult<()> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64) -> IntroResult<()> {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> IntroResult<()> {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            origin,
            style: *style,
        });
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> IntroResult<()> {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_owned(),
            origin,
            style: *style,
        });
        Ok(())
    }
}
