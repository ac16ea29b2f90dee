//! Experience Layout CLI
//!
//! Usage:
//!   experience-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -l, --layout <TOKEN>  Layout strategy (radial, tree, force-directed, orthogonal)
//!   -c, --config <FILE>   Layout configuration (TOML, or JSON for .json files)
//!   --ignore-manual       Move manually positioned nodes too
//!   --lint                Report crowded and unplaced nodes on stderr
//!   --strict              Exit with status 2 on any warning or lint finding
//!   -p, --pretty          Pretty-print the JSON output
//!   -v, --verbose         Debug logging (RUST_LOG overrides)
//!   -h, --help            Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use experience_layout::document::{self, DocumentFormat};
use experience_layout::layout::lint;
use experience_layout::{compute_layout, LayoutConfig, LayoutType};

#[derive(Parser)]
#[command(name = "experience-layout")]
#[command(about = "Lay out experience map trees")]
struct Cli {
    /// Input file (reads JSON from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout strategy token
    #[arg(short, long, default_value = "radial")]
    layout: String,

    /// Layout configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reposition nodes even when they are flagged as manually positioned
    #[arg(long)]
    ignore_manual: bool,

    /// Report layout defects after computing the layout
    #[arg(long)]
    lint: bool,

    /// Treat warnings and lint findings as failures
    #[arg(long)]
    strict: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Print the available layout strategies and exit
    #[arg(long)]
    list_layouts: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.list_layouts {
        for layout in LayoutType::ALL {
            println!("{}", layout);
        }
        return;
    }

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("Reading nodes from stdin; pass a FILE or pipe a JSON document. See --help.");
    }

    let config = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };
    let config = if cli.ignore_manual {
        config.with_preserve_manual_positions(false)
    } else {
        config
    };

    let nodes = match &cli.input {
        Some(path) => match document::read_file(path) {
            Ok(nodes) => nodes,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            match document::parse(&buffer, DocumentFormat::Json) {
                Ok(nodes) => nodes,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };
    info!("loaded {} nodes", nodes.len());

    let outcome = compute_layout(&nodes, &cli.layout, &config);
    let mut findings = outcome.warnings.len();

    if cli.lint {
        let lint_warnings = lint::check(&outcome.nodes, config.min_node_distance());
        for warning in &lint_warnings {
            eprintln!("lint: {}", warning);
        }
        findings += lint_warnings.len();
    }

    match document::to_json(&outcome.nodes, cli.pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.strict && findings > 0 {
        std::process::exit(2);
    }
}
