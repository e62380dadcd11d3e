use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "sangkien", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart spec as a PNG.
    Chart(ChartArgs),
    /// Render a mindmap spec as a PNG.
    Mindmap(MindmapArgs),
    /// Assemble generated markdown into document blocks (JSON).
    Assemble(AssembleArgs),
}

#[derive(Parser, Debug)]
struct ChartArgs {
    /// Input chart JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Visual style.
    #[arg(long, value_enum, default_value_t = StyleChoice::Standard)]
    style: StyleChoice,
}

#[derive(Parser, Debug)]
struct MindmapArgs {
    /// Input mindmap JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Visual theme.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Colorful)]
    theme: ThemeChoice,
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Input markdown file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output blocks JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Topic name, used to recognize echoed header metadata.
    #[arg(long, default_value = "")]
    topic: String,

    /// Chart style for rendered fences.
    #[arg(long, value_enum, default_value_t = StyleChoice::Standard)]
    style: StyleChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Standard,
    Flat,
    Dark,
}

impl From<StyleChoice> for sangkien::ChartStyle {
    fn from(c: StyleChoice) -> Self {
        match c {
            StyleChoice::Standard => sangkien::ChartStyle::Standard,
            StyleChoice::Flat => sangkien::ChartStyle::Flat,
            StyleChoice::Dark => sangkien::ChartStyle::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Colorful,
    Professional,
    Organic,
}

impl From<ThemeChoice> for sangkien::MindmapTheme {
    fn from(c: ThemeChoice) -> Self {
        match c {
            ThemeChoice::Colorful => sangkien::MindmapTheme::Colorful,
            ThemeChoice::Professional => sangkien::MindmapTheme::Professional,
            ThemeChoice::Organic => sangkien::MindmapTheme::Organic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Chart(args) => cmd_chart(args),
        Command::Mindmap(args) => cmd_mindmap(args),
        Command::Assemble(args) => cmd_assemble(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_chart(args: ChartArgs) -> anyhow::Result<()> {
    let spec: sangkien::ChartSpec = read_json(&args.in_path, "chart spec")?;
    let image = sangkien::render_chart(&spec, args.style.into())?;
    write_output(&args.out, &image.png)
}

fn cmd_mindmap(args: MindmapArgs) -> anyhow::Result<()> {
    let spec: sangkien::MindmapSpec = read_json(&args.in_path, "mindmap spec")?;
    let image = sangkien::render_mindmap(&spec, args.theme.into())?;
    write_output(&args.out, &image.png)
}

fn cmd_assemble(args: AssembleArgs) -> anyhow::Result<()> {
    let markdown = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read markdown '{}'", args.in_path.display()))?;
    let blocks = sangkien::assemble(&markdown, &args.topic, args.style.into());
    let json = serde_json::to_vec_pretty(&blocks).with_context(|| "serialize blocks JSON")?;
    write_output(&args.out, &json)
}
