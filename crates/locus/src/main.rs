use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use locus_dom::{Document, NodeId};
use locus_engine::config::{load_config, load_config_from};
use locus_engine::format::{format_outline, format_resolution};
use locus_engine::{Strategy, resolve};
use tracing::debug;

#[derive(Parser)]
#[command(name = "locus", version, about = "Locator resolution for document snapshots")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the best locator pair for one node of a snapshot
    Locate {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Node id to resolve
        node: u32,

        /// Resolution strategy: scored or legacy
        #[arg(long)]
        strategy: Option<String>,

        /// Config file (default: ./locus.yaml, then ~/.locus/config.yaml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a snapshot outline with node ids
    Inspect {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Log to stderr so stdout stays clean for the resolution output.
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Locate {
            snapshot,
            node,
            strategy,
            config,
            json,
        } => locate(&snapshot, node, strategy.as_deref(), config.as_deref(), json),
        Command::Inspect { snapshot } => inspect(&snapshot),
    }
}

fn locate(
    snapshot: &Path,
    node: u32,
    strategy: Option<&str>,
    config_path: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let doc = read_snapshot(snapshot)?;
    let config = match config_path {
        Some(path) => load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => load_config()?,
    };
    let strategy = match strategy {
        Some(raw) => raw.parse::<Strategy>().map_err(anyhow::Error::msg)?,
        None => config.resolver.strategy,
    };
    debug!(%strategy, node, "resolving");

    let resolution = resolve(&doc, NodeId(node), strategy, &config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print!("{}", format_resolution(&resolution));
    }
    Ok(())
}

fn inspect(snapshot: &Path) -> anyhow::Result<()> {
    let doc = read_snapshot(snapshot)?;
    print!("{}", format_outline(&doc));
    Ok(())
}

fn read_snapshot(path: &Path) -> anyhow::Result<Document> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    Document::from_json(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}
