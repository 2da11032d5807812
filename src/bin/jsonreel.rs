use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jsonreel", version)]
struct Cli {
    /// JSON config file with display, font and logging defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pretty-printed document.
    Preview(PreviewArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render every frame and export the last one as `json-video-<millis>.png`.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input JSON document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Declared content type; derived from the file extension when omitted.
    #[arg(long)]
    content_type: Option<String>,
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Animation length in seconds.
    #[arg(long)]
    duration: Option<u32>,

    /// Background color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    #[arg(long)]
    bg: Option<jsonreel::Rgba8>,

    /// Text color.
    #[arg(long)]
    text_color: Option<jsonreel::Rgba8>,

    /// Base font size in pixels.
    #[arg(long)]
    font_size: Option<u32>,

    /// TTF/OTF font used for all text; a system sans-serif face is used otherwise.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    display: DisplayArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    display: DisplayArgs,

    /// Directory receiving the exported artifact.
    #[arg(long)]
    out_dir: PathBuf,

    /// Also write every frame as a numbered PNG into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => jsonreel::ReelConfig::from_path(path)?,
        None => jsonreel::ReelConfig::default(),
    };
    jsonreel::logging::init_logging(&config.logging);

    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Frame(args) => cmd_frame(args, config),
        Command::Export(args) => cmd_export(args, config),
    }
}

fn load_session(
    input: &InputArgs,
    options: jsonreel::DisplayOptions,
    font: Option<jsonreel::FontSource>,
) -> anyhow::Result<jsonreel::Session> {
    let content_type = input
        .content_type
        .as_deref()
        .map(jsonreel::ContentType::new);
    let mut session = jsonreel::Session::new(options).with_font(font);
    session
        .load_document(&input.in_path, content_type.as_ref())
        .with_context(|| format!("load '{}'", input.in_path.display()))?;
    Ok(session)
}

fn display_options(
    args: &DisplayArgs,
    base: jsonreel::DisplayOptions,
) -> anyhow::Result<jsonreel::DisplayOptions> {
    let mut opts = base;
    if let Some(d) = args.duration {
        opts.duration_secs = d;
    }
    if let Some(c) = args.bg {
        opts.background = c;
    }
    if let Some(c) = args.text_color {
        opts.text_color = c;
    }
    if let Some(s) = args.font_size {
        opts.font_size_px = s;
    }
    opts.validate()?;
    Ok(opts)
}

fn resolve_font(
    args: &DisplayArgs,
    config: &jsonreel::ReelConfig,
) -> anyhow::Result<Option<jsonreel::FontSource>> {
    let path = jsonreel::pick_font_path(args.font.clone(), config.font.clone());
    Ok(jsonreel::FontSource::resolve(path.as_deref())?)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let session = load_session(&args.input, jsonreel::DisplayOptions::default(), None)?;
    if let Some(text) = session.render_preview() {
        println!("{text}");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs, config: jsonreel::ReelConfig) -> anyhow::Result<()> {
    let opts = display_options(&args.display, config.display.clone())?;
    let font = resolve_font(&args.display, &config)?;
    let session = load_session(&args.input, opts, font)?;

    let frame = session.render_frame(jsonreel::FrameIndex(args.frame))?;
    let png = jsonreel::encode_png(&frame)?;
    write_file(&args.out, &png)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs, config: jsonreel::ReelConfig) -> anyhow::Result<()> {
    let opts = display_options(&args.display, config.display.clone())?;
    let font = resolve_font(&args.display, &config)?;
    let session = load_session(&args.input, opts, font)?;

    let mut request = jsonreel::ExportRequest::new(&args.out_dir);
    request.frames_dir = args.frames_dir;

    let report = session.run_export(&request, &mut |event| match event {
        jsonreel::ExportEvent::Started { total_frames } => {
            eprintln!("rendering {total_frames} frames...");
        }
        jsonreel::ExportEvent::Progress {
            frame,
            total_frames,
            progress,
        } => {
            eprintln!(
                "frame {}/{total_frames} ({:.0}%)",
                frame.0 + 1,
                progress * 100.0
            );
        }
        jsonreel::ExportEvent::Finished { ok } => {
            if !ok {
                eprintln!("export failed");
            }
        }
    })?;

    eprintln!(
        "wrote {} ({}, {} bytes, {} frames)",
        report.artifact.path.display(),
        report.artifact.content_type,
        report.artifact.size,
        report.frames_rendered
    );
    println!("{}", report.artifact.path.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}
