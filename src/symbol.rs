use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::IntroResult;
use crate::surface::{DrawCommand, DrawSurface, TextStyle};

/// Opacity of a foreground noise digit.
pub const DEFAULT_SYMBOL_OPACITY: f64 = 0.8;

/// One glyph of the matrix, valid for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Symbol {
    /// Character to draw.
    pub glyph: char,
    /// Horizontal center in pixels.
    pub x: f64,
    /// Baseline in pixels.
    pub y: f64,
    /// Opacity in `0..=1`.
    pub opacity: f64,
}

impl Symbol {
    /// Create a symbol; `opacity` is clamped to `0..=1`.
    pub fn new(glyph: char, x: f64, y: f64, opacity: f64) -> Self {
        Self {
            glyph,
            x,
            y,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    fn style(&self, size_px: f64, color: Rgba8) -> TextStyle {
        TextStyle::plain(size_px, color.with_opacity(self.opacity)).centered()
    }

    /// Draw centered on `(x, y)` in `color` scaled by the symbol opacity.
    pub fn draw<D: DrawSurface + ?Sized>(
        &self,
        surface: &mut D,
        size_px: f64,
        color: Rgba8,
    ) -> IntroResult<()> {
        let mut buf = [0u8; 4];
        surface.fill_text(
            self.glyph.encode_utf8(&mut buf),
            Point::new(self.x, self.y),
            &self.style(size_px, color),
        )
    }

    /// Same as [`Symbol::draw`], as a deferred command.
    pub fn to_command(&self, size_px: f64, color: Rgba8) -> DrawCommand {
        DrawCommand::FillText {
            text: self.glyph.to_string(),
            origin: Point::new(self.x, self.y),
            style: self.style(size_px, color),
        }
    }
}
