use super::*;
use crate::render::fonts::system_font;

fn surface(w: u32, h: u32) -> Option<CpuSurface> {
    let Some(bytes) = system_font() else {
        eprintln!("skipping: no system font available");
        return None;
    };
    Some(CpuSurface::new(w, h, bytes).unwrap())
}

fn green() -> Rgba8 {
    Rgba8::rgb(57, 228, 57)
}

#[test]
fn zero_size_and_bad_font_are_surface_errors() {
    assert!(matches!(
        checked_size(0, 10),
        Err(IntroError::Surface(_))
    ));
    assert!(matches!(
        checked_size(70_000, 10),
        Err(IntroError::Surface(_))
    ));
    assert!(matches!(
        CpuSurface::new(10, 10, b"not a font".to_vec()),
        Err(IntroError::Surface(_))
    ));
}

#[test]
fn clear_and_rects_persist_between_flushes() {
    let Some(mut s) = surface(40, 30) else {
        return;
    };
    s.clear(Rgba8::BLACK).unwrap();
    s.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), green()).unwrap();
    let frame = s.snapshot();
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 15), Some([57, 228, 57, 255]));

    // No clear: the previous rect is still there.
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), green()).unwrap();
    let frame = s.snapshot();
    assert_eq!(frame.pixel(15, 15), Some([57, 228, 57, 255]));
    assert_eq!(frame.pixel(2, 2), Some([57, 228, 57, 255]));
}

#[test]
fn opaque_clear_drops_pending_draws() {
    let Some(mut s) = surface(20, 20) else {
        return;
    };
    s.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0), green()).unwrap();
    s.clear(Rgba8::BLACK).unwrap();
    assert_eq!(s.snapshot().pixel(10, 10), Some([0, 0, 0, 255]));
}

#[test]
fn text_is_measured_and_painted() {
    let Some(mut s) = surface(200, 60) else {
        return;
    };
    assert_eq!(s.measure_text("", 22.0), 0.0);
    let one = s.measure_text("8", 22.0);
    let three = s.measure_text("888", 22.0);
    assert!(one > 0.0);
    assert!((three - 3.0 * one).abs() < 0.5);

    s.clear(Rgba8::BLACK).unwrap();
    s.fill_text("Trace", Point::new(30.0, 35.0), &TextStyle::plain(22.0, green()))
        .unwrap();
    let frame = s.snapshot();
    let lit = frame
        .data
        .chunks_exact(4)
        .filter(|px| px[1] > px[0] && px[1] > 100)
        .count();
    assert!(lit > 20, "expected green glyph pixels, got {lit}");
}

#[test]
fn glow_spreads_beyond_glyphs() {
    let Some(mut plain) = surface(160, 60) else {
        return;
    };
    let Some(mut glowing) = surface(160, 60) else {
        return;
    };
    let style = TextStyle::plain(22.0, green());
    let glow = Glow {
        color: green(),
        radius: 20.0,
    };
    for (s, style) in [
        (&mut plain, style),
        (&mut glowing, style.with_glow(Some(glow))),
    ] {
        s.clear(Rgba8::BLACK).unwrap();
        s.fill_text("M", Point::new(30.0, 35.0), &style).unwrap();
    }
    let count = |f: &FrameRGBA| f.data.chunks_exact(4).filter(|px| px[1] > 0).count();
    assert!(count(&glowing.snapshot()) > count(&plain.snapshot()));
}

#[test]
fn resize_reallocates_transparent() {
    let Some(mut s) = surface(20, 20) else {
        return;
    };
    s.clear(Rgba8::BLACK).unwrap();
    s.resize(30, 10).unwrap();
    assert_eq!(
        s.size(),
        Canvas {
            width: 30,
            height: 10
        }
    );
    assert_eq!(s.snapshot().pixel(5, 5), Some([0, 0, 0, 0]));
    assert!(s.resize(0, 10).is_err());
}
