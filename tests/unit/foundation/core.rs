use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert_eq!(
        r.iter().collect::<Vec<_>>(),
        vec![FrameIndex(2), FrameIndex(3), FrameIndex(4)]
    );
}

#[test]
fn fps_frame_timing() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frame_to_ms(FrameIndex(60)) - 1000.0).abs() < 1e-9);
    assert_eq!(fps.ms_to_frames_ceil(1000.0), 60);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::parse_hex("#39E439").unwrap(), Rgba8::rgb(57, 228, 57));
    assert_eq!(
        Rgba8::parse_hex("000000ff").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 255
        }
    );
    assert!(Rgba8::parse_hex("#123").is_err());
    assert!(Rgba8::parse_hex("#zz0000").is_err());
}

#[test]
fn color_deserializes_from_hex_or_object() {
    let c: Rgba8 = serde_json::from_str("\"#ff0000\"").unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));
    let c: Rgba8 = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
}

#[test]
fn opacity_scales_alpha_only() {
    let c = Rgba8::rgb(57, 228, 57).with_opacity(0.5);
    assert_eq!((c.r, c.g, c.b), (57, 228, 57));
    assert_eq!(c.a, 128);
    assert_eq!(Rgba8::rgb(1, 1, 1).with_opacity(f64::NAN).a, 0);
    assert_eq!(Rgba8::rgb(255, 255, 255).with_opacity(0.0).to_premul_bytes(), [0, 0, 0, 0]);
}
