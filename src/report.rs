//! Report files: client vector, distance matrix, route and cost.

use crate::error::{Result, TspError};
use crate::instance::TspInstance;
use crate::solution::Solution;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CLIENT_VECTOR_FILE: &str = "vector_clientes.txt";
pub const MATRIX_FILE: &str = "matriz.txt";
pub const ROUTE_FILE: &str = "ruta_y_costo.txt";

/// Writes the three report files into a target directory
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        ReportWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write all three files, returning their paths in write order
    pub fn write_all(&self, instance: &TspInstance, solution: &Solution) -> Result<Vec<PathBuf>> {
        let files = [
            (CLIENT_VECTOR_FILE, format_client_vector(&instance.client_vector())),
            (MATRIX_FILE, format_matrix(&instance.distance_matrix)),
            (ROUTE_FILE, format_route(solution)),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = self.output_dir.join(name);
            write_file(&path, &contents)?;
            log::info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let to_err = |source| TspError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_err)?;
    let mut out = BufWriter::new(file);
    out.write_all(contents.as_bytes()).map_err(to_err)?;
    out.flush().map_err(to_err)
}

fn join_spaced(values: &[usize]) -> String {
    values.iter().map(|v| format!("{} ", v)).collect()
}

/// `vector_clientes.txt` contents
pub fn format_client_vector(clients: &[usize]) -> String {
    format!(
        "Vector de clientes (índices de las ciudades):\n{}",
        join_spaced(clients)
    )
}

/// `matriz.txt` contents: one row per line, width 6, no decimals
pub fn format_matrix(matrix: &[Vec<f64>]) -> String {
    let mut out = format!("Matriz de distancias redondeada (1..{}):\n", matrix.len());
    for row in matrix {
        for value in row {
            out.push_str(&format!("{:6.0} ", value));
        }
        out.push('\n');
    }
    out
}

/// `ruta_y_costo.txt` contents
pub fn format_route(solution: &Solution) -> String {
    format!(
        "Ruta secuencial:\n{}\nCosto total: {:.2}\n",
        join_spaced(&solution.display_tour()),
        solution.cost
    )
}
