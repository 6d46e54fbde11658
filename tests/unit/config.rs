use super::*;

#[test]
fn defaults_match_classic_intro() {
    let cfg = IntroConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.animation.glyph_size, 22);
    assert_eq!(cfg.animation.frame_gate, 4);
    assert_eq!(cfg.animation.target, "9375019583");
    assert_eq!(cfg.animation.loop_duration_ms(), 8.0 * 3000.0 + 15000.0);
    assert_eq!(cfg.banner.text, "System failure");
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = IntroConfig::from_json_str(
        r#"{
            "animation": { "columns_per_block": 13, "keep_columns": 3, "target": "+380501234567" }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.animation.columns_per_block, 13);
    assert_eq!(cfg.animation.glyph_size, 22);
    assert_eq!(cfg.script, ScriptConfig::default());
    assert_eq!(cfg.animation.loop_duration_ms(), 10.0 * 3000.0 + 15000.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = IntroConfig::from_json_str(r#"{ "animation": { "speed": 3 } }"#).unwrap_err();
    assert!(matches!(err, IntroError::Serde(_)));
}

#[test]
fn degenerate_block_settings_are_rejected() {
    let mut a = AnimationConfig {
        keep_columns: 10,
        ..AnimationConfig::default()
    };
    assert!(a.validate().is_err());

    a.keep_columns = 2;
    a.target = "12345678901".to_owned();
    assert!(a.validate().is_err());

    a.target = "1234567890".to_owned();
    a.validate().unwrap();

    a.columns_per_block = 0;
    assert!(a.validate().is_err());
}

#[test]
fn zero_gates_and_intervals_are_rejected() {
    let a = AnimationConfig {
        frame_gate: 0,
        ..AnimationConfig::default()
    };
    assert!(a.validate().is_err());

    let a = AnimationConfig {
        reveal_interval_ms: 0.0,
        ..AnimationConfig::default()
    };
    assert!(a.validate().is_err());

    let s = ScriptConfig {
        blink_gate: 0,
        ..ScriptConfig::default()
    };
    assert!(s.validate().is_err());

    let b = BannerConfig {
        gate: 0,
        ..BannerConfig::default()
    };
    assert!(b.validate().is_err());
}

#[test]
fn bad_timestamp_pattern_is_rejected() {
    let s = ScriptConfig {
        timestamp_format: "%Q".to_owned(),
        ..ScriptConfig::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn first_message_wraps_timestamp() {
    let s = ScriptConfig {
        timestamp: Some("1/2/2030, 3:04:05 PM".to_owned()),
        ..ScriptConfig::default()
    };
    let stamp = s.timestamp_now();
    assert_eq!(
        s.first_message(&stamp),
        "Call trans opt: received. 1/2/2030, 3:04:05 PM REC:log>"
    );
}
