//! Tour representation and evaluation.
//!
//! A `Solution` holds a closed tour over the instance nodes together with its
//! cost. `trace` walks the tour hop by hop, ending with the edge back to the
//! first node.

use crate::instance::TspInstance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a tour walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    /// Origin node (0-indexed)
    pub from: usize,
    /// Destination node (0-indexed)
    pub to: usize,
    pub distance: f64,
    /// True for the final edge back to the start
    pub closing: bool,
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "De ciudad {:2} a ciudad {:2} → Distancia: {:.2}",
            self.from + 1,
            self.to + 1,
            self.distance
        )?;
        if self.closing {
            write!(f, " (regreso al inicio)")?;
        }
        Ok(())
    }
}

/// Represents an evaluated tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Node indices in visiting order (0-indexed, implicitly closed)
    pub tour: Vec<usize>,
    /// Total closed-tour length
    pub cost: f64,
    /// How the tour was produced
    pub label: String,
}

impl Solution {
    /// The sequential tour 1 -> 2 -> ... -> n -> 1
    pub fn identity(instance: &TspInstance) -> Self {
        Self::from_tour(instance, (0..instance.dimension).collect(), "secuencial")
    }

    /// Create a solution from an arbitrary tour
    pub fn from_tour(instance: &TspInstance, tour: Vec<usize>, label: &str) -> Self {
        let cost = instance.tour_cost(&tour);
        Solution {
            tour,
            cost,
            label: label.to_string(),
        }
    }

    /// Hops of the closed tour: n-1 consecutive hops, then the closing hop.
    /// A single-node tour yields only the closing hop (node to itself).
    pub fn trace(&self, instance: &TspInstance) -> Vec<Hop> {
        let (first, last) = match (self.tour.first(), self.tour.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Vec::new(),
        };

        let mut hops: Vec<Hop> = self
            .tour
            .windows(2)
            .map(|w| Hop {
                from: w[0],
                to: w[1],
                distance: instance.distance(w[0], w[1]),
                closing: false,
            })
            .collect();

        hops.push(Hop {
            from: last,
            to: first,
            distance: instance.distance(last, first),
            closing: true,
        });

        hops
    }

    /// Tour as 1-based indices, the way it appears in the reports
    pub fn display_tour(&self) -> Vec<usize> {
        self.tour.iter().map(|&n| n + 1).collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution ({})", self.label)?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Tour: {:?}", self.display_tour())
    }
}
