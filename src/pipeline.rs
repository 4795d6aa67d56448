//! Load, evaluate and report, end to end.

use crate::error::{Result, TspError};
use crate::instance::{TspInstance, DEFAULT_MAX_NODES};
use crate::report::ReportWriter;
use crate::solution::Solution;
use crate::visualization::Visualizer;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Coordinate file to read
    pub input: PathBuf,
    /// Directory receiving the three report files
    pub output_dir: PathBuf,
    /// Upper bound on the number of nodes read
    pub max_nodes: usize,
    /// Optional SVG plot of the tour
    pub svg: Option<PathBuf>,
    /// Optional JSON export of the solution
    pub json: Option<PathBuf>,
    /// Print instance statistics
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input: PathBuf::from("bayg29.tsp"),
            output_dir: PathBuf::from("."),
            max_nodes: DEFAULT_MAX_NODES,
            svg: None,
            json: None,
            verbose: false,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub instance: TspInstance,
    pub solution: Solution,
    pub files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    instance: &'a str,
    dimension: usize,
    nodes: &'a [crate::instance::Node],
    tour: Vec<usize>,
    cost: f64,
    label: &'a str,
}

/// Run the pipeline, printing the console report on stdout
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Run the pipeline, printing the console report on `out`.
///
/// Nothing is written to disk unless loading succeeds. A console that can't be
/// written to (closed pipe) is logged and does not stop the report files.
pub fn run_with_output<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let instance = TspInstance::from_file(&config.input, config.max_nodes)?;
    log::info!("Loaded {} nodes", instance.dimension);

    let solution = Solution::identity(&instance);
    let console_ok = warn_on_console_error(print_evaluation(out, config, &instance, &solution));

    let mut files = ReportWriter::new(&config.output_dir).write_all(&instance, &solution)?;

    if let Some(svg_path) = &config.svg {
        let viz = Visualizer::new();
        viz.save_svg(&viz.generate_svg(&instance, &solution), svg_path)?;
        log::info!("Wrote {}", svg_path.display());
        files.push(svg_path.clone());
    }

    if let Some(json_path) = &config.json {
        let export = JsonExport {
            instance: &instance.name,
            dimension: instance.dimension,
            nodes: &instance.nodes,
            tour: solution.display_tour(),
            cost: solution.cost,
            label: &solution.label,
        };
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(json_path, json).map_err(|source| TspError::Write {
            path: json_path.clone(),
            source,
        })?;
        log::info!("Wrote {}", json_path.display());
        files.push(json_path.clone());
    }

    if console_ok {
        warn_on_console_error(print_footer(out, &files));
    }

    Ok(RunSummary {
        instance,
        solution,
        files,
    })
}

fn warn_on_console_error(result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Console output stopped: {}", e);
            false
        }
    }
}

fn print_evaluation<W: Write>(
    out: &mut W,
    config: &RunConfig,
    instance: &TspInstance,
    solution: &Solution,
) -> io::Result<()> {
    writeln!(
        out,
        "Se leyeron {} nodos del archivo {}\n",
        instance.dimension,
        config.input.display()
    )?;
    write_coordinates(out, instance)?;

    if config.verbose {
        writeln!(out, "{}", instance.statistics())?;
    }

    let clients: Vec<String> = instance.client_vector().iter().map(|c| c.to_string()).collect();
    writeln!(out, "Vector de clientes:\n[ {} ]\n", clients.join(" "))?;

    writeln!(out, "Recorrido paso a paso:")?;
    let mut total = 0.0;
    for hop in solution.trace(instance) {
        total += hop.distance;
        writeln!(out, "{}", hop)?;
    }
    writeln!(out, "\nCosto total del recorrido: {:.2}", total)?;

    if config.verbose {
        writeln!(out, "\n{}", solution)?;
    }
    Ok(())
}

fn print_footer<W: Write>(out: &mut W, files: &[PathBuf]) -> io::Result<()> {
    let names: Vec<String> = files
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    writeln!(out, "\nArchivos generados: {}", names.join(", "))?;
    writeln!(out, "Programa finalizado correctamente.")
}

fn write_coordinates<W: Write>(out: &mut W, instance: &TspInstance) -> io::Result<()> {
    writeln!(out, "Coordenadas leídas:")?;
    writeln!(out, "ID\tX\t\tY")?;
    writeln!(out, "-----------------------------------")?;
    for node in &instance.nodes {
        writeln!(out, "{:2}\t{:.2}\t{:.2}", node.display_index(), node.x, node.y)?;
    }
    writeln!(out, "-----------------------------------\n")
}
