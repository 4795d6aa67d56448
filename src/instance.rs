//! Module for parsing and representing TSP instances.
//!
//! Reads the coordinate listing of a TSP-LIB style file (`<id> <x> <y>` lines,
//! terminated by `EOF`) and precomputes the rounded Euclidean distance matrix.

use crate::error::{Result, TspError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default node limit, matches the historical fixed-size arrays
pub const DEFAULT_MAX_NODES: usize = 200;

/// Represents a city of the instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Assignment index (0-indexed internally, shown as index + 1)
    pub index: usize,
    /// Id column as written in the file; informational only
    pub file_id: i64,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Node {
    pub fn new(index: usize, file_id: i64, x: f64, y: f64) -> Self {
        Node { index, file_id, x, y }
    }

    /// 1-based index used on screen and in the report files
    pub fn display_index(&self) -> usize {
        self.index + 1
    }
}

/// Represents a loaded TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance (source path)
    pub name: String,
    /// Number of nodes read
    pub dimension: usize,
    /// Nodes in read order
    pub nodes: Vec<Node>,
    /// Precomputed distance matrix
    #[serde(skip)]
    pub distance_matrix: Vec<Vec<f64>>,
}

impl TspInstance {
    /// Parse an instance from a coordinate file.
    ///
    /// Fails with `FileOpen` when the path can't be opened, `CapacityExceeded`
    /// when more than `max_nodes` data lines are found and `NoValidNodes` when
    /// none are.
    pub fn from_file<P: AsRef<Path>>(path: P, max_nodes: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TspError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading coordinates from {}", path.display());
        Self::from_reader(BufReader::new(file), path, max_nodes)
    }

    /// Parse an instance from any buffered reader; `path` is only used for
    /// the instance name and error messages.
    ///
    /// Lines are read as raw bytes, so header lines in other encodings are
    /// skipped like any other non-data line.
    pub fn from_reader<R: BufRead, P: AsRef<Path>>(mut reader: R, path: P, max_nodes: usize) -> Result<Self> {
        let path = path.as_ref();
        let mut nodes: Vec<Node> = Vec::new();
        let mut skipped = 0usize;
        let mut buf: Vec<u8> = Vec::new();

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|source| TspError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_start();

            if line.starts_with("EOF") {
                break;
            }
            if !line.starts_with(|c: char| c.is_ascii_digit()) {
                skipped += 1;
                continue;
            }

            match parse_coord_line(line) {
                Some((file_id, x, y)) => {
                    if nodes.len() + 1 > max_nodes {
                        return Err(TspError::CapacityExceeded { limit: max_nodes });
                    }
                    nodes.push(Node::new(nodes.len(), file_id, x, y));
                }
                None => {
                    log::trace!("Ignoring malformed line: {:?}", line);
                    skipped += 1;
                }
            }
        }

        log::debug!("{} lines skipped while reading {}", skipped, path.display());

        if nodes.is_empty() {
            return Err(TspError::NoValidNodes { path: path.to_path_buf() });
        }

        Ok(Self::from_nodes(path.display().to_string(), nodes))
    }

    /// Build an instance from nodes already in memory
    pub fn from_nodes(name: String, nodes: Vec<Node>) -> Self {
        let distance_matrix = Self::compute_distance_matrix(&nodes);
        log::debug!("Built {}x{} distance matrix", nodes.len(), nodes.len());

        TspInstance {
            name,
            dimension: nodes.len(),
            nodes,
            distance_matrix,
        }
    }

    /// Compute the Euclidean distance matrix rounded to the nearest integer
    /// (ties away from zero).
    pub fn compute_distance_matrix(nodes: &[Node]) -> Vec<Vec<f64>> {
        let n = nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                let dx = nodes[i].x - nodes[j].x;
                let dy = nodes[i].y - nodes[j].y;
                matrix[i][j] = (dx * dx + dy * dy).sqrt().round();
            }
        }

        matrix
    }

    /// Get the distance between two nodes (0-indexed)
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance_matrix[i][j]
    }

    /// Client index vector: `[1, 2, ..., n]`
    pub fn client_vector(&self) -> Vec<usize> {
        self.nodes.iter().map(Node::display_index).collect()
    }

    /// Length of a closed tour: consecutive hops plus the edge back to the start
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        let (first, last) = match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return 0.0,
        };

        let inner: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        inner + self.distance(last, first)
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let mut distances: Vec<f64> = Vec::new();
        for i in 0..self.dimension {
            for j in i + 1..self.dimension {
                distances.push(self.distance(i, j));
            }
        }

        let (avg_distance, min_distance, max_distance) = if distances.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                distances.iter().sum::<f64>() / distances.len() as f64,
                distances.iter().cloned().fold(f64::INFINITY, f64::min),
                distances.iter().cloned().fold(0.0, f64::max),
            )
        };

        let mut bounds = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for node in &self.nodes {
            bounds.0 = bounds.0.min(node.x);
            bounds.1 = bounds.1.max(node.x);
            bounds.2 = bounds.2.min(node.y);
            bounds.3 = bounds.3.max(node.y);
        }

        InstanceStatistics {
            name: self.name.clone(),
            dimension: self.dimension,
            avg_distance,
            min_distance,
            max_distance,
            bounds,
        }
    }
}

/// Reads `<int> <float> <float>` from the first three fields; anything after
/// them is ignored.
fn parse_coord_line(line: &str) -> Option<(i64, f64, f64)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some((id, x, y))
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub dimension: usize,
    pub avg_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// (min_x, max_x, min_y, max_y)
    pub bounds: (f64, f64, f64, f64),
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Nodes: {}", self.dimension)?;
        writeln!(f, "  X range: [{:.2}, {:.2}]", self.bounds.0, self.bounds.1)?;
        writeln!(f, "  Y range: [{:.2}, {:.2}]", self.bounds.2, self.bounds.3)?;
        writeln!(f, "  Min distance: {:.2}", self.min_distance)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str, max_nodes: usize) -> Result<TspInstance> {
        TspInstance::from_reader(Cursor::new(text), "test.tsp", max_nodes)
    }

    #[test]
    fn test_distance_calculation() {
        let nodes = vec![
            Node::new(0, 1, 0.0, 0.0),
            Node::new(1, 2, 3.0, 4.0),
        ];
        let matrix = TspInstance::compute_distance_matrix(&nodes);

        assert_eq!(matrix[0][1], 5.0);
        assert_eq!(matrix[1][0], 5.0);
        assert_eq!(matrix[0][0], 0.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // sqrt(0.25 + 0) = 0.5 -> 1, sqrt(2.25) = 1.5 -> 2, sqrt(2) = 1.41 -> 1
        let nodes = vec![
            Node::new(0, 1, 0.0, 0.0),
            Node::new(1, 2, 0.5, 0.0),
            Node::new(2, 3, 1.5, 0.0),
            Node::new(3, 4, 1.0, 1.0),
        ];
        let m = TspInstance::compute_distance_matrix(&nodes);
        assert_eq!(m[0][1], 1.0);
        assert_eq!(m[0][2], 2.0);
        assert_eq!(m[0][3], 1.0);
    }

    #[test]
    fn test_matrix_symmetric_zero_diagonal() {
        let inst = parse("1 12.5 7.1\n2 -3.0 44.9\n3 100 0.2\n4 6 6\nEOF\n", 10).unwrap();
        for i in 0..inst.dimension {
            assert_eq!(inst.distance(i, i), 0.0);
            for j in 0..inst.dimension {
                assert_eq!(inst.distance(i, j), inst.distance(j, i));
                let dx = inst.nodes[i].x - inst.nodes[j].x;
                let dy = inst.nodes[i].y - inst.nodes[j].y;
                assert_eq!(inst.distance(i, j), (dx * dx + dy * dy).sqrt().round());
                assert_eq!(inst.distance(i, j).fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_skips_headers_and_comments() {
        let with_headers = "NAME: bayg29\nTYPE: TSP\nDIMENSION: 3\nNODE_COORD_SECTION\n  1 0.0 0.0\n# comment\n2 3.0 4.0\n\n   3 6.0 8.0\nEOF\n";
        let stripped = "1 0.0 0.0\n2 3.0 4.0\n3 6.0 8.0\n";
        let a = parse(with_headers, 200).unwrap();
        let b = parse(stripped, 200).unwrap();
        assert_eq!(a.dimension, 3);
        assert_eq!(a.dimension, b.dimension);
        assert_eq!(a.distance_matrix, b.distance_matrix);
    }

    #[test]
    fn test_non_utf8_header_is_skipped() {
        let bytes: &[u8] = b"NAME: bayg29\nCOMMENT: Gr\xf6tschel\nNODE_COORD_SECTION\n1 0.0 0.0\n2 3.0 4.0\n3 6.0 8.0\nEOF\n";
        let inst = TspInstance::from_reader(Cursor::new(bytes), "latin1.tsp", 200).unwrap();
        assert_eq!(inst.dimension, 3);
        assert_eq!(inst.tour_cost(&[0, 1, 2]), 20.0);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let inst = parse("1 0.0 0.0\r\n2 3.0 4.0\r\n3 6.0 8.0", 200).unwrap();
        assert_eq!(inst.dimension, 3);
        assert_eq!(inst.nodes[2].y, 8.0);
    }

    #[test]
    fn test_stops_at_eof() {
        let inst = parse("1 0 0\n2 1 1\n  EOF\n3 5 5\n4 9 9\n", 200).unwrap();
        assert_eq!(inst.dimension, 2);
    }

    #[test]
    fn test_index_is_read_order_not_file_id() {
        let inst = parse("7 1.0 2.0\n3 4.0 5.0\n", 200).unwrap();
        assert_eq!(inst.client_vector(), vec![1, 2]);
        assert_eq!(inst.nodes[0].file_id, 7);
        assert_eq!(inst.nodes[1].file_id, 3);
    }

    #[test]
    fn test_malformed_digit_lines_ignored() {
        let inst = parse("1 2.0\n2 abc 3.0\n3 1.0 1.0 extra\n", 200).unwrap();
        assert_eq!(inst.dimension, 1);
        assert_eq!(inst.nodes[0].x, 1.0);
    }

    #[test]
    fn test_capacity_exceeded() {
        let err = parse("1 0 0\n2 1 1\n3 2 2\n", 2).unwrap_err();
        assert!(matches!(err, TspError::CapacityExceeded { limit: 2 }));
        assert!(parse("1 0 0\n2 1 1\n", 2).is_ok());
    }

    #[test]
    fn test_no_valid_nodes() {
        let err = parse("NAME: empty\nEOF\n", 200).unwrap_err();
        assert!(matches!(err, TspError::NoValidNodes { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TspInstance::from_file("definitely/not/here.tsp", 200).unwrap_err();
        assert!(matches!(err, TspError::FileOpen { .. }));
    }

    #[test]
    fn test_tour_cost() {
        let inst = parse("1 0.0 0.0\n2 3.0 4.0\n3 6.0 8.0\nEOF\n", 200).unwrap();
        assert_eq!(inst.tour_cost(&[0, 1, 2]), 20.0);
        assert_eq!(inst.tour_cost(&[2, 0, 1]), 20.0);
        assert_eq!(inst.tour_cost(&[0]), 0.0);
        assert_eq!(inst.tour_cost(&[]), 0.0);
    }

    #[test]
    fn test_statistics() {
        let inst = parse("1 0.0 0.0\n2 3.0 4.0\n3 6.0 8.0\n", 200).unwrap();
        let stats = inst.statistics();
        assert_eq!(stats.dimension, 3);
        assert_eq!(stats.min_distance, 5.0);
        assert_eq!(stats.max_distance, 10.0);
        assert!((stats.avg_distance - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.bounds, (0.0, 6.0, 0.0, 8.0));
    }
}
