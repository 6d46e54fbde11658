use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

fn out_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("matrix-intro-{}", std::process::id()))
        .join(name)
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path("odd.mp4")));
    let err = sink.begin(cfg(11, 10)).unwrap_err();
    assert!(matches!(err, IntroError::Validation(_)));
    assert!(sink.child.is_none());
}

#[test]
fn frames_before_begin_are_rejected() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path("idle.mp4")));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn encodes_a_short_clip_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let path = out_path("clip.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
    sink.begin(cfg(16, 16)).unwrap();
    for i in 0..5u64 {
        let v = (i * 40) as u8;
        let frame = FrameRGBA {
            width: 16,
            height: 16,
            data: [v, v, v, 255].repeat(256),
            premultiplied: true,
        };
        sink.push_frame(FrameIndex(i), &frame).unwrap();
    }
    sink.end().unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
    let _ = std::fs::remove_file(&path);
}
