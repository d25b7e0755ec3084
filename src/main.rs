use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use treeart::layout::LayoutOptions;
use treeart::measure::TextMetrics;
use treeart::render_tree;
use treeart::request;

/// Marks a missing node when given as an element.
const ABSENT: &str = "_";

#[derive(Parser, Debug)]
#[command(name = "treeart", about = "Render a level-order binary tree to SVG")]
struct Cli {
    /// Node labels in level order; `_` or an empty string is a missing node.
    elements: Vec<String>,
    /// Read labels from a file, one per line (`-` for stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Treat the input as a JSON request and print the JSON response.
    #[arg(long, requires = "input")]
    json: bool,
    /// Draw blank placeholder children under every node.
    #[arg(long)]
    ghosts: bool,
    /// Fill blank placeholders black.
    #[arg(long)]
    black_blanks: bool,
    /// Paint a white background behind the diagram.
    #[arg(long)]
    white_bg: bool,
    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let output = if cli.json {
        run_json(&cli)?
    } else {
        run_svg(&cli)?
    };

    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", output),
    }

    Ok(())
}

fn run_svg(cli: &Cli) -> Result<String> {
    let raw: Vec<String> = match &cli.input {
        Some(path) => read_input(path)?
            .lines()
            .map(str::to_string)
            .collect(),
        None => cli.elements.clone(),
    };

    let metrics = TextMetrics::default();
    let slots = raw
        .iter()
        .map(|e| match e.trim() {
            "" | ABSENT => None,
            s => Some(metrics.truncate(s).to_string()),
        })
        .collect();

    let options = LayoutOptions {
        add_blank_external_nodes: cli.ghosts,
        make_blank_external_nodes_black: cli.black_blanks,
        add_white_bg: cli.white_bg,
    };
    let scene = render_tree(slots, options).context("nothing to draw")?;
    tracing::info!(
        width = scene.view_box_width(),
        raster_width = scene.raster_width(),
        "rendered tree"
    );
    Ok(scene.to_svg_string())
}

fn run_json(cli: &Cli) -> Result<String> {
    let path = cli.input.as_ref().context("--json needs --input")?;
    let body = read_input(path)?;
    let response = request::handle(body.as_bytes()).map_err(|e| {
        let (code, reason) = e.status();
        anyhow::anyhow!("{} {}: {}", code, reason, e)
    })?;
    Ok(serde_json::to_string(&response)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
