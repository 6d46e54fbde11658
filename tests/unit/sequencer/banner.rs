use super::*;
use crate::surface::{RecordingSurface, TextAlign};

fn canvas() -> Canvas {
    Canvas {
        width: 800,
        height: 600,
    }
}

#[test]
fn rect_is_centered() {
    let cfg = BannerConfig::default();
    let palette = Palette::default();
    let r = FailureBanner::new(&cfg, &palette).rect(canvas());
    assert_eq!(r, Rect::new(200.0, 275.0, 600.0, 325.0));
}

#[test]
fn hidden_banner_only_clears() {
    let cfg = BannerConfig::default();
    let palette = Palette::default();
    let mut out = Vec::new();
    FailureBanner::new(&cfg, &palette).commands(canvas(), false, &mut out);
    assert_eq!(
        out,
        vec![DrawCommand::FillRect {
            rect: Rect::new(200.0, 275.0, 600.0, 325.0),
            color: palette.background,
        }]
    );
}

#[test]
fn visible_banner_draws_border_and_centered_label() {
    let cfg = BannerConfig::default();
    let palette = Palette::default();
    let mut rec = RecordingSurface::new(800, 600);
    FailureBanner::new(&cfg, &palette).draw(&mut rec, true).unwrap();

    assert_eq!(rec.commands.len(), 3);
    assert!(matches!(rec.commands[1], DrawCommand::StrokeRect { width, .. } if width == 2.0));
    let DrawCommand::FillText {
        text,
        origin,
        style,
    } = &rec.commands[2]
    else {
        panic!("expected label");
    };
    assert_eq!(text, "System failure");
    assert_eq!(*origin, Point::new(400.0, 312.0));
    assert_eq!(style.align, TextAlign::Center);
    assert_eq!(style.size_px, 40.0);
}
