//! Error types for the tour report pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, TspError>;

/// Every failure the loader, the report writer or the CLI can hit
#[derive(Error, Debug)]
pub enum TspError {
    /// Input file missing or unreadable
    #[error("{}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while reading an already opened input
    #[error("Error de lectura en {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// More data lines than the configured node limit
    #[error("Demasiados nodos (límite {limit}). Aumenta --max-nodes.")]
    CapacityExceeded { limit: usize },

    /// No line matched `<int> <float> <float>`
    #[error("No se encontraron nodos válidos en {}", .path.display())]
    NoValidNodes { path: PathBuf },

    /// An output file could not be created or written
    #[error("No se pudo escribir {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON export failed
    #[error("Error de JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TspError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the message belongs on stdout rather than stderr.
    /// Only the "no valid nodes" report is printed on stdout.
    pub fn to_stdout(&self) -> bool {
        matches!(self, TspError::NoValidNodes { .. })
    }
}
