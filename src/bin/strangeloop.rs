use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use strangeloop::miu;

#[derive(Parser, Debug)]
#[command(name = "strangeloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene as a PNG.
    Render(RenderArgs),
    /// Dump a stepped scene's event sequence as JSON lines.
    Trace(TraceArgs),
    /// Apply MIU rewrite rules in order and print the derivation.
    Derive(DeriveArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many step events and render the paused mid-run
    /// picture (stepped scenes only).
    #[arg(long)]
    steps: Option<u64>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DeriveArgs {
    /// Rules to apply in order (I, II, III, IV).
    #[arg(long, value_delimiter = ',', required = true)]
    rules: Vec<String>,

    /// Starting theorem.
    #[arg(long, default_value = miu::AXIOM)]
    start: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Trace(args) => cmd_trace(args),
        Command::Derive(args) => cmd_derive(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<strangeloop::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: strangeloop::Scene =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let frame = strangeloop::render_scene(&scene, args.steps)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let events = strangeloop::trace_scene(&scene)?;

    let mut lines = String::new();
    for event in &events {
        lines.push_str(&serde_json::to_string(event).with_context(|| "serialize step event")?);
        lines.push('\n');
    }

    match &args.out {
        Some(path) => {
            std::fs::write(path, lines)
                .with_context(|| format!("write trace '{}'", path.display()))?;
            eprintln!("wrote {} ({} events)", path.display(), events.len());
        }
        None => print!("{lines}"),
    }
    Ok(())
}

fn cmd_derive(args: DeriveArgs) -> anyhow::Result<()> {
    let mut derivation = miu::Derivation::new(args.start);
    for raw in &args.rules {
        let rule: miu::Rule = raw.parse()?;
        derivation
            .apply(rule)
            .with_context(|| format!("apply rule {}", rule.numeral()))?;
    }
    for (i, step) in derivation.history().iter().enumerate() {
        println!("{}. {step}", i + 1);
    }
    Ok(())
}
