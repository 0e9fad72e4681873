mod format;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use dag_layout::{DagNode, LayeredLayout, LayoutEngine, NodeId, PartialLayoutConfig};
use format::Format;
use report::Report;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Compute a layered layout for a list of DAG nodes
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Node list, `-` reads standard input
    input: PathBuf,

    /// Format of the node list, guessed from the extension by default
    #[arg(long, value_enum)]
    input_format: Option<Format>,

    /// Layout configuration file, JSON or RON
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<f32>,

    #[arg(long)]
    height: Option<f32>,

    #[arg(long)]
    horizontal_gap: Option<f32>,

    #[arg(long)]
    vertical_gap: Option<f32>,

    #[arg(long)]
    edge_padding: Option<f32>,

    /// Draw the edges of this node last
    #[arg(long)]
    selected: Option<NodeId>,

    /// Include edge routes in the output
    #[arg(long)]
    routes: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

impl Args {
    fn flag_config(&self) -> PartialLayoutConfig {
        PartialLayoutConfig {
            width: self.width,
            height: self.height,
            horizontal_gap: self.horizontal_gap,
            vertical_gap: self.vertical_gap,
            edge_padding: self.edge_padding,
        }
    }

    fn is_stdin(&self) -> bool {
        self.input == Path::new("-")
    }

    fn input_format(&self) -> Format {
        self.input_format
            .or_else(|| Format::from_path(&self.input))
            .unwrap_or_default()
    }
}

fn read_nodes(args: &Args) -> Result<Vec<DagNode>> {
    let text = if args.is_stdin() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Unable to read nodes from stdin")?;
        text
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Unable to read {}", args.input.display()))?
    };

    args.input_format()
        .parse(&text)
        .with_context(|| format!("Unable to parse nodes from {}", args.input.display()))
}

fn read_config(args: &Args) -> Result<PartialLayoutConfig> {
    let file_config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Unable to read {}", path.display()))?;
            Format::from_path(path)
                .unwrap_or_default()
                .parse(&text)
                .with_context(|| format!("Unable to parse configuration {}", path.display()))?
        }
        None => PartialLayoutConfig::default(),
    };

    Ok(file_config.merge(args.flag_config()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout is for the layout
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let nodes = read_nodes(&args)?;
    let config = read_config(&args)?.resolve();
    debug!("Laying out {} node(s) with {config:?}", nodes.len());

    let diagnostics = Mutex::new(Vec::new());
    let engine = LayeredLayout::new(config);
    let layout = engine
        .layout(&nodes, &(), &diagnostics)
        .prioritize(args.selected);

    let diagnostics = diagnostics
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if !diagnostics.is_empty() {
        warn!("{} problem(s) found in the input, see above", diagnostics.len());
    }
    info!(
        "{} node(s), {} edge(s)",
        layout.nodes.len(),
        layout.edges.len()
    );

    let report = Report::new(&layout, config, args.routes);
    println!("{}", args.format.render(&report)?);

    Ok(())
}
