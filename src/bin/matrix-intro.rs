use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use matrix_intro::render::fonts::load_font;
use matrix_intro::{
    Canvas, FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, FrameRange, FrameSink, Grid,
    IntroConfig, PhaseDescriptor, PhasePlan, PngSequenceSink, RenderSession, RenderSessionOpts,
    write_png,
};

#[derive(Parser, Debug)]
#[command(name = "matrix-intro", version, about = "Render the falling-numbers matrix intro")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a clip as MP4 (requires `ffmpeg` on PATH) or as a PNG sequence.
    Render(RenderArgs),
    /// Print the phase plan and loop timing as JSON.
    Plan(Common),
}

#[derive(Args, Debug)]
struct Common {
    /// Configuration JSON; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Surface width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Surface height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Output frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Noise seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// TTF/OTF font; defaults to the first common system font found.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: Common,
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: Common,
    /// Output MP4 path, or a directory with `--png`.
    #[arg(long)]
    out: PathBuf,
    /// Number of frames; defaults to one full loop.
    #[arg(long, conflicts_with = "seconds")]
    frames: Option<u64>,
    /// Clip length in seconds.
    #[arg(long)]
    seconds: Option<f64>,
    /// Write `frame_00000.png`, ... into `--out` instead of encoding MP4.
    #[arg(long, default_value_t = false)]
    png: bool,
    /// Refuse to replace an existing MP4.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

impl Common {
    fn load_config(&self) -> anyhow::Result<IntroConfig> {
        match &self.config {
            Some(path) => Ok(IntroConfig::from_path(path)?),
            None => Ok(IntroConfig::default()),
        }
    }

    fn session(&self) -> anyhow::Result<(IntroConfig, RenderSession)> {
        let cfg = self.load_config()?;
        let font = load_font(self.font.as_deref()).context("load font")?;
        let opts = RenderSessionOpts {
            width: self.width,
            height: self.height,
            fps: Fps::new(self.fps, 1)?,
            seed: self.seed,
        };
        let session = RenderSession::new(cfg.clone(), opts, font)?;
        Ok((cfg, session))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Plan(common) => cmd_plan(common),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (_, mut session) = args.common.session()?;
    let frame = session.render_frame(FrameIndex(args.frame))?;
    write_png(&args.out, &frame)?;
    tracing::info!(frame = args.frame, phase = ?session.phase(), "frame rendered");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (cfg, mut session) = args.common.session()?;
    let fps = session.opts().fps;
    let frames = match (args.frames, args.seconds) {
        (Some(n), _) => n,
        (None, Some(s)) => fps.ms_to_frames_ceil(s * 1000.0),
        (None, None) => fps.ms_to_frames_ceil(estimated_loop_ms(&cfg, fps)),
    };
    let range = FrameRange::new(FrameIndex(0), FrameIndex(frames))?;

    let mut sink: Box<dyn FrameSink> = if args.png {
        Box::new(PngSequenceSink::new(&args.out))
    } else {
        let mut opts = FfmpegSinkOpts::new(&args.out);
        opts.overwrite = !args.no_overwrite;
        opts.background = cfg.palette.background;
        Box::new(FfmpegSink::new(opts))
    };
    let stats = session
        .render_range(range, sink.as_mut())
        .with_context(|| format!("render to '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} loops)",
        args.out.display(),
        stats.frames_out,
        stats.loops
    );
    Ok(())
}

fn cmd_plan(common: Common) -> anyhow::Result<()> {
    let cfg = common.load_config()?;
    let fps = Fps::new(common.fps, 1)?;
    let plan = PhasePlan::classic(&cfg.script, &cfg.script.timestamp_now());
    let grid = Grid::for_surface(
        Canvas {
            width: common.width,
            height: common.height,
        },
        cfg.animation.glyph_size,
    );
    let doc = serde_json::json!({
        "phases": plan,
        "grid": grid,
        "loop_duration_ms": cfg.animation.loop_duration_ms(),
        "estimated_total_ms": estimated_loop_ms(&cfg, fps),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Wall-clock length of one pass through the plan at `fps`, including the failure banner.
fn estimated_loop_ms(cfg: &IntroConfig, fps: Fps) -> f64 {
    let plan = PhasePlan::classic(&cfg.script, &cfg.script.timestamp_now());
    let frame_ms = fps.frame_duration_ms();
    plan.phases()
        .iter()
        .map(|phase| match phase {
            PhaseDescriptor::Blink { duration_ms, .. } => *duration_ms,
            // One gated tick per char, one at full length and one to complete.
            PhaseDescriptor::Type { message } => {
                (message.chars().count() as f64 + 2.0) * cfg.script.type_gate as f64 * frame_ms
            }
            PhaseDescriptor::Matrix => {
                cfg.animation.loop_duration_ms() + cfg.banner.gate as f64 * frame_ms
            }
        })
        .sum()
}
