//! TSP Tour Report - Command Line Interface
//!
//! Evaluates the sequential tour of a TSP coordinate file and writes the
//! report files to disk.

use clap::Parser;
use tsp_tour_report::instance::DEFAULT_MAX_NODES;
use tsp_tour_report::pipeline::{self, RunConfig};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tsp-tour-report")]
#[command(version = "1.0")]
#[command(about = "Distance matrix and sequential tour cost for a TSP coordinate file")]
struct Cli {
    /// Coordinate file (`<id> <x> <y>` lines, `EOF` terminated)
    #[arg(default_value = "bayg29.tsp")]
    input: PathBuf,

    /// Directory for vector_clientes.txt, matriz.txt and ruta_y_costo.txt
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum number of nodes accepted
    #[arg(long, default_value_t = DEFAULT_MAX_NODES, value_parser = parse_max_nodes)]
    max_nodes: usize,

    /// Also save an SVG plot of the tour
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Also save the tour as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print instance statistics
    #[arg(short, long)]
    verbose: bool,
}

/// Node limit: a positive integer that fits in `usize`
fn parse_max_nodes(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid node limit `{}`: {}", s, e)),
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            input: cli.input,
            output_dir: cli.output_dir,
            max_nodes: cli.max_nodes,
            svg: cli.svg,
            json: cli.json,
            verbose: cli.verbose,
        }
    }
}

fn main() {
    env_logger::init();

    let config = RunConfig::from(Cli::parse());

    if let Err(e) = pipeline::run(&config) {
        if e.to_stdout() {
            println!("{}", e);
        } else {
            eprintln!("{}", e);
        }
        std::process::exit(e.exit_code());
    }
}
