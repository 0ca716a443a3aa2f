use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

use particle_banner::{
    AnimationLoop, BannerConfig, CpuFrameRenderer, EventScript, FfmpegSink, FfmpegSinkOpts,
    FrameSink, Fps, GlyphRasterizer, InputEvent, MaskRasterizer, OfflineScheduler,
    PacedScheduler, PngSequenceSink, Scene, SiteMetadata, SurfaceSize, SvgTextRasterizer,
    SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "particle-banner", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a few ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Write the rasterized text mask as a grayscale PNG.
    Mask(MaskArgs),
    /// Render an animation to a PNG sequence or an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the static site metadata as JSON.
    Metadata,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Banner configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Shape text from this font file instead of the system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Extra directories searched for fonts (system fonts are always loaded).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Override the configured RNG seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of ticks to run before capturing.
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Pointer position as `x,y`, applied before the first tick.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<(f64, f64)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output path: `*.mp4` encodes with ffmpeg, anything else is a PNG sequence directory.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 120)]
    frames: u64,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Input event script JSON.
    #[arg(long, conflicts_with = "sweep")]
    events: Option<PathBuf>,

    /// Sweep the pointer across the banner instead of loading a script.
    #[arg(long, default_value_t = false)]
    sweep: bool,

    /// Pace ticks against the wall clock instead of rendering as fast as possible.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Keep an existing MP4 and fail instead of replacing it.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Render(args) => cmd_render(args),
        Command::Metadata => cmd_metadata(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

fn load_config(args: &SceneArgs) -> anyhow::Result<BannerConfig> {
    let mut cfg = match &args.config {
        Some(path) => BannerConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => BannerConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn build_rasterizer(args: &SceneArgs) -> anyhow::Result<Box<dyn MaskRasterizer>> {
    if let Some(path) = &args.font {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let sha = sha256_hex(&bytes);
        let raster = GlyphRasterizer::new(bytes)
            .with_context(|| format!("load font '{}'", path.display()))?;
        tracing::info!(
            font = %path.display(),
            family = raster.family_name(),
            sha256 = %sha,
            "using glyph rasterizer"
        );
        return Ok(Box::new(raster));
    }

    let raster = SvgTextRasterizer::with_font_dirs(&args.font_dirs);
    if raster.face_count() == 0 {
        tracing::warn!("no fonts found; the text mask will be empty");
    }
    Ok(Box::new(raster))
}

fn build_scene(args: &SceneArgs) -> anyhow::Result<Scene> {
    let cfg = load_config(args)?;
    let raster = build_rasterizer(args)?;
    Ok(Scene::new(
        cfg,
        raster,
        SurfaceSize::new(args.width, args.height),
    )?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut scene = build_scene(&args.scene)?;
    if let Some((x, y)) = args.pointer {
        scene.handle_event(&InputEvent::Move { x, y });
    }
    for _ in 0..args.ticks.max(1) {
        scene.tick();
    }

    let mut renderer = CpuFrameRenderer::new();
    let frame = renderer.render(
        scene.surface(),
        scene.config().palette.background,
        scene.draws(),
    )?;
    particle_banner::write_frame_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} ({} particles, scale {})",
        args.out.display(),
        scene.field().len(),
        scene.scale()
    );
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut raster = build_rasterizer(&args.scene)?;
    let surface = SurfaceSize::new(args.scene.width, args.scene.height);
    let text = particle_banner::rasterize_text(
        raster.as_mut(),
        &cfg.label,
        surface,
        cfg.viewport.scale_for(surface),
    )?;
    particle_banner::write_mask_png(&args.out, &text.mask)?;

    eprintln!(
        "wrote {} ({} of {} pixels above alpha {})",
        args.out.display(),
        text.mask.lit_count(cfg.field.alpha_threshold),
        surface.area(),
        cfg.field.alpha_threshold
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let mut scene = build_scene(&args.scene)?;

    let script = match (&args.events, args.sweep) {
        (Some(path), _) => EventScript::from_path(path)
            .with_context(|| format!("load events '{}'", path.display()))?,
        (None, true) => EventScript::horizontal_sweep(scene.surface(), args.frames),
        (None, false) => EventScript::new(),
    };

    if is_mp4(&args.out) && script.has_resize() {
        anyhow::bail!(
            "'{}' records at a fixed size but the event script resizes the banner; \
             write a png sequence instead",
            args.out.display()
        );
    }

    let mut sink = make_sink(&args.out, !args.no_overwrite);
    let mut looper = AnimationLoop::new(fps).with_script(script);
    let stats = if args.realtime {
        let mut sched = PacedScheduler::new(SystemClock::new(), fps, Some(args.frames));
        looper.run(&mut scene, &mut sched, sink.as_mut())?
    } else {
        looper.run(
            &mut scene,
            &mut OfflineScheduler::new(args.frames),
            sink.as_mut(),
        )?
    };

    eprintln!(
        "wrote {} ({} frames, {} particles at end)",
        args.out.display(),
        stats.frames_rendered,
        stats.final_particles
    );
    Ok(())
}

fn is_mp4(out: &Path) -> bool {
    out.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}

fn make_sink(out: &Path, overwrite: bool) -> Box<dyn FrameSink> {
    if is_mp4(out) {
        Box::new(FfmpegSink::new(FfmpegSinkOpts {
            overwrite,
            ..FfmpegSinkOpts::new(out)
        }))
    } else {
        Box::new(PngSequenceSink::new(out))
    }
}

fn cmd_metadata() -> anyhow::Result<()> {
    println!("{}", SiteMetadata::default().to_json_pretty()?);
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
