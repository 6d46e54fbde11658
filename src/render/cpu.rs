use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{IntroError, IntroResult};
use crate::foundation::math::premul_over_in_place;
use crate::render::FrameRGBA;
use crate::render::blur::{blur_premul_in_place, kernel_radius};
use crate::surface::{DrawSurface, Glow, TextAlign, TextMeasure, TextStyle};

const LAYOUT_CACHE_LIMIT: usize = 512;
/// Canvas default `lineWidth` for outlined text.
const TEXT_STROKE_WIDTH: f64 = 1.0;

type TextLayout = parley::Layout<()>;

/// Shapes text with a single registered font family and caches the results.
struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    cache: HashMap<(String, u32), Rc<TextLayout>>,
}

impl TextShaper {
    fn new(font_bytes: &[u8]) -> IntroResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| IntroError::surface("no font family registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| IntroError::surface("registered font family has no name"))?
            .to_string();
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            cache: HashMap::new(),
        })
    }

    fn layout(&mut self, text: &str, size_px: f64) -> Rc<TextLayout> {
        let size = size_px as f32;
        let key = (text.to_owned(), size.to_bits());
        if let Some(hit) = self.cache.get(&key) {
            return Rc::clone(hit);
        }
        if self.cache.len() >= LAYOUT_CACHE_LIMIT {
            self.cache.clear();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        let mut layout: TextLayout = builder.build(text);
        layout.break_all_lines(None);

        let layout = Rc::new(layout);
        self.cache.insert(key, Rc::clone(&layout));
        layout
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TextPaint {
    Fill,
    Stroke,
}

/// Persistent RGBA canvas rendered with `vello_cpu`.
///
/// Like an HTML canvas, pixels survive between frames until overdrawn. Draw calls are batched
/// into a pending render context and composited over the canvas on [`CpuSurface::flush`];
/// a full opaque clear discards the pending batch.
pub struct CpuSurface {
    width: u16,
    height: u16,
    canvas: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    pending: Option<vello_cpu::RenderContext>,
    font: vello_cpu::peniko::FontData,
    shaper: RefCell<TextShaper>,
}

impl CpuSurface {
    /// Create a transparent surface; text is shaped with the first family in `font_bytes`.
    pub fn new(width: u32, height: u32, font_bytes: Vec<u8>) -> IntroResult<Self> {
        let (w, h) = checked_size(width, height)?;
        let shaper = TextShaper::new(&font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            width: w,
            height: h,
            canvas: vello_cpu::Pixmap::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            pending: None,
            font,
            shaper: RefCell::new(shaper),
        })
    }

    /// Reallocate at a new size. Like a canvas resize, existing pixels are dropped.
    pub fn resize(&mut self, width: u32, height: u32) -> IntroResult<()> {
        let (w, h) = checked_size(width, height)?;
        self.width = w;
        self.height = h;
        self.canvas = vello_cpu::Pixmap::new(w, h);
        self.scratch = vello_cpu::Pixmap::new(w, h);
        self.pending = None;
        Ok(())
    }

    /// Composite every pending draw call onto the canvas.
    pub fn flush(&mut self) {
        let Some(mut ctx) = self.pending.take() else {
            return;
        };
        ctx.flush();
        clear_pixmap(&mut self.scratch, [0, 0, 0, 0]);
        ctx.render_to_pixmap(&mut self.scratch);
        premul_over_in_place(
            self.canvas.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        );
    }

    /// Flush and copy out the canvas as premultiplied RGBA8.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.flush();
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.canvas.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        let (w, h) = (self.width, self.height);
        let ctx = self
            .pending
            .get_or_insert_with(|| vello_cpu::RenderContext::new(w, h));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx
    }

    /// Queue `text` and return its pixel bounds.
    fn queue_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        color: Rgba8,
        paint: TextPaint,
        into_scratch_ctx: Option<&mut vello_cpu::RenderContext>,
    ) -> Rect {
        let layout = self.shaper.borrow_mut().layout(text, style.size_px);
        let width = f64::from(layout.width());
        let baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
        };
        let x0 = origin.x + dx;
        let y0 = origin.y - baseline;

        let font = self.font.clone();
        let ctx = match into_scratch_ctx {
            Some(ctx) => ctx,
            None => self.ctx(),
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x0, y0)));
        ctx.set_paint(to_cpu_color(color));
        if paint == TextPaint::Stroke {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(TEXT_STROKE_WIDTH));
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let builder = ctx.glyph_run(&font).font_size(run.run().font_size());
                match paint {
                    TextPaint::Fill => builder.fill_glyphs(glyphs),
                    TextPaint::Stroke => builder.stroke_glyphs(glyphs),
                }
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        Rect::new(x0, y0, x0 + width, y0 + f64::from(layout.height()))
    }

    /// Paint a blurred copy of the text under whatever is drawn next.
    fn paint_glow(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        glow: Glow,
        paint: TextPaint,
    ) {
        self.flush();
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let bounds = self.queue_text(text, origin, style, glow.color, paint, Some(&mut ctx));
        ctx.flush();
        clear_pixmap(&mut self.scratch, [0, 0, 0, 0]);
        ctx.render_to_pixmap(&mut self.scratch);

        let pad = f64::from(kernel_radius(glow.radius));
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        let x0 = (bounds.x0 - pad).floor().clamp(0.0, w as f64) as usize;
        let x1 = (bounds.x1 + pad).ceil().clamp(0.0, w as f64) as usize;
        let y0 = (bounds.y0 - pad).floor().clamp(0.0, h as f64) as usize;
        let y1 = (bounds.y1 + pad).ceil().clamp(0.0, h as f64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let (rw, rh) = (x1 - x0, y1 - y0);
        let mut region = Vec::with_capacity(rw * rh * 4);
        let scratch = self.scratch.data_as_u8_slice();
        for y in y0..y1 {
            region.extend_from_slice(&scratch[(y * w + x0) * 4..(y * w + x1) * 4]);
        }
        blur_premul_in_place(&mut region, rw, rh, glow.radius);

        let canvas = self.canvas.data_as_u8_slice_mut();
        for (row, y) in (y0..y1).enumerate() {
            premul_over_in_place(
                &mut canvas[(y * w + x0) * 4..(y * w + x1) * 4],
                &region[row * rw * 4..(row + 1) * rw * 4],
            );
        }
    }

    fn text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        paint: TextPaint,
    ) -> IntroResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(IntroError::surface("text size must be finite and > 0"));
        }
        if let Some(glow) = style.glow.filter(|g| g.radius > 0.0) {
            self.paint_glow(text, origin, style, glow, paint);
        }
        self.queue_text(text, origin, style, style.color, paint, None);
        Ok(())
    }
}

impl TextMeasure for CpuSurface {
    fn measure_text(&self, text: &str, size_px: f64) -> f64 {
        if text.is_empty() || !size_px.is_finite() || size_px <= 0.0 {
            return 0.0;
        }
        f64::from(self.shaper.borrow_mut().layout(text, size_px).width())
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn clear(&mut self, color: Rgba8) -> IntroResult<()> {
        if color.a == 255 {
            self.pending = None;
            clear_pixmap(&mut self.canvas, color.to_premul_bytes());
            return Ok(());
        }
        let rect = self.size().rect();
        self.fill_rect(rect, color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> IntroResult<()> {
        let ctx = self.ctx();
        ctx.set_paint(to_cpu_color(color));
        ctx.fill_rect(&to_cpu_rect(rect));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64) -> IntroResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(IntroError::surface("stroke width must be finite and > 0"));
        }
        let ctx = self.ctx();
        ctx.set_paint(to_cpu_color(color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.stroke_rect(&to_cpu_rect(rect));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> IntroResult<()> {
        self.text(text, origin, style, TextPaint::Fill)
    }

    fn stroke_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> IntroResult<()> {
        self.text(text, origin, style, TextPaint::Stroke)
    }
}

fn checked_size(width: u32, height: u32) -> IntroResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(IntroError::surface(format!("surface must be non-empty, got {width}x{height}")));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| IntroError::surface("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| IntroError::surface("surface height exceeds u16"))?;
    Ok((w, h))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, premul: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn to_cpu_rect(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
