use crate::config::{BannerConfig, Palette};
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::IntroResult;
use crate::surface::{DrawCommand, DrawSurface, TextStyle, apply_all};

/// Stateless "System failure" overlay renderer. Visibility is owned by the caller.
#[derive(Clone, Copy, Debug)]
pub struct FailureBanner<'a> {
    cfg: &'a BannerConfig,
    palette: &'a Palette,
}

impl<'a> FailureBanner<'a> {
    /// Bind banner geometry and colors.
    pub fn new(cfg: &'a BannerConfig, palette: &'a Palette) -> Self {
        Self { cfg, palette }
    }

    /// Box centered on the surface, `font_size + 2 * padding` tall.
    pub fn rect(&self, canvas: Canvas) -> Rect {
        let (w, h) = canvas.size_f64();
        let x0 = w / 2.0 - self.cfg.width / 2.0;
        let y0 = h / 2.0 - self.cfg.font_size / 2.0 - self.cfg.padding;
        Rect::new(
            x0,
            y0,
            x0 + self.cfg.width,
            y0 + self.cfg.font_size + 2.0 * self.cfg.padding,
        )
    }

    /// Emit the clearing fill, then border and label when `visible`.
    pub fn commands(&self, canvas: Canvas, visible: bool, out: &mut Vec<DrawCommand>) {
        let rect = self.rect(canvas);
        out.push(DrawCommand::FillRect {
            rect,
            color: self.palette.background,
        });
        if !visible {
            return;
        }

        out.push(DrawCommand::StrokeRect {
            rect,
            color: self.palette.foreground,
            width: self.cfg.border_width,
        });
        let (w, h) = canvas.size_f64();
        out.push(DrawCommand::FillText {
            text: self.cfg.text.clone(),
            origin: Point::new(w / 2.0, h / 2.0 + self.cfg.font_size * 0.3),
            style: TextStyle::plain(self.cfg.font_size, self.palette.foreground).centered(),
        });
    }

    /// Paint directly onto `surface`.
    pub fn draw<D: DrawSurface + ?Sized>(&self, surface: &mut D, visible: bool) -> IntroResult<()> {
        let mut out = Vec::with_capacity(3);
        self.commands(surface.size(), visible, &mut out);
        apply_all(&out, surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/banner.rs"]
mod tests;
