//! TSP Tour Report Library
//!
//! Reads the coordinate listing of a TSP instance, builds the rounded
//! Euclidean distance matrix and evaluates the sequential tour
//! `1 -> 2 -> ... -> n -> 1`.
//!
//! # Features
//!
//! - Tolerant parser for `<id> <x> <y>` listings terminated by `EOF`
//! - Rounded distance matrix and closed-tour cost
//! - Plain-text reports (`vector_clientes.txt`, `matriz.txt`, `ruta_y_costo.txt`)
//! - Optional SVG plot and JSON export
//!
//! # Example
//!
//! ```no_run
//! use tsp_tour_report::instance::{TspInstance, DEFAULT_MAX_NODES};
//! use tsp_tour_report::solution::Solution;
//!
//! let instance = TspInstance::from_file("bayg29.tsp", DEFAULT_MAX_NODES).unwrap();
//! let solution = Solution::identity(&instance);
//!
//! println!("Tour cost: {:.2}", solution.cost);
//! ```

pub mod error;
pub mod instance;
pub mod pipeline;
pub mod report;
pub mod solution;
pub mod visualization;

pub use error::TspError;
pub use instance::TspInstance;
pub use solution::Solution;
