use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "drawout", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the reveal sequence as JSON.
    Plan(PlanArgs),
    /// Render the drawing at one point in time as a PNG.
    Frame(FrameArgs),
    /// Write the drawing with its styles at one point in time as SVG.
    Svg(SvgArgs),
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// `id` of the element whose shapes are revealed.
    #[arg(long)]
    container: String,

    /// Seconds per element.
    #[arg(long)]
    speed: Option<f64>,

    /// Seconds before the first reveal.
    #[arg(long)]
    delay: Option<f64>,

    /// Signed seconds between consecutive reveals (negative overlaps).
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<f64>,

    /// Total seconds for the whole container; overrides --speed.
    #[arg(long)]
    to_complete: Option<f64>,

    /// Reveal effect: draw or fadeIn.
    #[arg(long)]
    effect: Option<drawout::Effect>,

    /// What offsets are measured from: previous-start or timeline-end.
    #[arg(long)]
    anchor: Option<drawout::OffsetAnchor>,

    /// Easing curve, e.g. out-quad, linear, in-out-cubic.
    #[arg(long)]
    ease: Option<drawout::Ease>,

    /// Sequencer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Seconds after playback begins.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels (height keeps the aspect ratio).
    #[arg(long)]
    width: Option<u32>,

    /// Background color as #rrggbb or #rrggbbaa.
    #[arg(long)]
    background: Option<String>,

    /// Skip loading system fonts.
    #[arg(long)]
    no_system_fonts: bool,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Seconds after playback begins.
    #[arg(long)]
    at: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct PlanReport<'a> {
    duration: f64,
    #[serde(flatten)]
    sequence: &'a drawout::Sequence,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_config(args: &SequenceArgs) -> anyhow::Result<drawout::SequencerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            drawout::SequencerConfig::from_json(&text)
                .with_context(|| format!("load config '{}'", path.display()))?
        }
        None => drawout::SequencerConfig::default(),
    };
    if let Some(anchor) = args.anchor {
        config.anchor = anchor;
    }
    if let Some(ease) = args.ease {
        config.ease = ease;
    }
    Ok(config)
}

fn read_document(path: &Path) -> anyhow::Result<drawout::Document> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("open svg '{}'", path.display()))?;
    let doc = drawout::Document::parse(&text)
        .with_context(|| format!("parse svg '{}'", path.display()))?;
    Ok(doc)
}

fn build_sequence(
    args: &SequenceArgs,
) -> anyhow::Result<(drawout::Document, drawout::Sequence)> {
    let config = read_config(args)?;
    let doc = read_document(&args.in_path)?;

    let call_site = drawout::PartialOptions {
        speed: args.speed,
        delay: args.delay,
        offset: args.offset,
        to_complete: args.to_complete,
        effect: args.effect,
    };
    let mut controller = drawout::SvgController::new(config);
    let seq = controller.init_svg(&doc, &args.container, call_site)?;
    Ok((doc, seq))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (_doc, seq) = build_sequence(&args.seq)?;
    let report = PlanReport {
        duration: seq.duration(),
        sequence: &seq,
    };
    let json = serde_json::to_string_pretty(&report).context("serialize plan")?;

    match args.out {
        Some(path) => {
            ensure_parent_dir(&path)?;
            std::fs::write(&path, json)
                .with_context(|| format!("write plan '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write plan to stdout")?;
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (doc, seq) = build_sequence(&args.seq)?;
    let styled = drawout::styled_at(&doc, &seq, args.at);

    let settings = drawout::RenderSettings {
        width: args.width,
        background: args.background.as_deref().map(parse_hex_rgba).transpose()?,
        resources_dir: args.seq.in_path.parent().map(Path::to_path_buf),
        system_fonts: !args.no_system_fonts,
    };
    let frame = drawout::render_frame(&styled, &settings)?;
    drawout::write_png(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let (doc, seq) = build_sequence(&args.seq)?;
    let styled = drawout::styled_at(&doc, &seq, args.at);

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, styled.to_svg_string())
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn parse_hex_rgba(s: &str) -> anyhow::Result<[u8; 4]> {
    let hex = s.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("background must be #rrggbb or #rrggbbaa (got '{s}')");
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok([byte(0)?, byte(2)?, byte(4)?, a])
}
