use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use orphta_fx::animation::timing::secs;
use orphta_fx::geo::{LandCollection, build_client, fetch_land};
use orphta_fx::{
    CpuBackend, FrameScheduler, GlobeWidget, InputEvent, Layout, ManualClock, PageConfig,
    ParticleHeading, RenderBackend, TextRasterizer, VaporTextWidget, Widget, WidgetId,
    WidgetMessage,
};

#[derive(Parser, Debug)]
#[command(name = "orphta-fx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the particle heading.
    Heading(RenderArgs),
    /// Render the vapor text cycle.
    Vapor(RenderArgs),
    /// Render the rotating globe.
    Globe(GlobeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Clock rate used to step between frames.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Output directory for numbered PNGs.
    #[arg(long)]
    out: PathBuf,

    /// Page config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Container width in CSS px.
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Container height in CSS px.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Extra font directories searched before system fonts.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct GlobeArgs {
    #[command(flatten)]
    render: RenderArgs,

    /// Read land GeoJSON from a file instead of fetching it.
    #[arg(long)]
    land_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Heading(args) => cmd_heading(args),
        Command::Vapor(args) => cmd_vapor(args),
        Command::Globe(args) => cmd_globe(args).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PageConfig> {
    let mut cfg = match path {
        Some(p) => PageConfig::load(p)?,
        None => PageConfig::default(),
    };
    cfg.apply_env();
    Ok(cfg)
}

fn cmd_heading(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let fonts = Arc::new(TextRasterizer::new(args.font_dirs.as_slice()));
    render_widget(Box::new(ParticleHeading::new(cfg.heading, fonts)), &args, |_, _| Ok(()))
}

fn cmd_vapor(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let fonts = Arc::new(TextRasterizer::new(args.font_dirs.as_slice()));
    render_widget(Box::new(VaporTextWidget::new(cfg.vapor, fonts)), &args, |_, _| Ok(()))
}

async fn cmd_globe(args: GlobeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.render.config.as_deref())?;
    let land = match &args.land_file {
        Some(path) => LandCollection::load_file(path),
        None => {
            let client = build_client(cfg.globe.fetch_timeout_secs.map(secs))?;
            fetch_land(&client, &cfg.globe.land_url).await
        }
    };
    let mut message = Some(WidgetMessage::LandData(land));
    render_widget(
        Box::new(GlobeWidget::new(cfg.globe)),
        &args.render,
        move |sched, id| {
            if let Some(m) = message.take() {
                sched.deliver(id, m);
            }
            match sched.view(id).as_ref().and_then(|v| v.error_text()) {
                Some(msg) => anyhow::bail!("{msg}"),
                None => Ok(()),
            }
        },
    )
}

/// Mount `widget` on a manual clock and write one PNG per produced frame.
fn render_widget(
    widget: Box<dyn Widget>,
    args: &RenderArgs,
    mut before_first: impl FnMut(&mut FrameScheduler, WidgetId) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be finite and > 0");
    }
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let clock = ManualClock::new();
    let mut sched = FrameScheduler::new(Box::new(clock.clone()));
    let id = sched.mount(widget);
    sched.dispatch(
        id,
        InputEvent::Resize(Layout::full(args.width, args.height, args.dpr)),
    );
    before_first(&mut sched, id)?;

    let step = secs(1.0 / args.fps);
    let mut backend = CpuBackend::new();
    let mut written = 0usize;
    for i in 0..args.frames {
        if i > 0 {
            clock.advance(step);
        }
        for (_, plan) in sched.run_frame() {
            let frame = backend.render_plan(&plan)?;
            let path = args.out.join(format!("frame_{i:05}.png"));
            image::save_buffer_with_format(
                &path,
                &frame.to_straight_rgba8(),
                frame.width,
                frame.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", path.display()))?;
            written += 1;
        }
    }

    sched.unmount(id);
    eprintln!("wrote {written} frames to {}", args.out.display());
    Ok(())
}
