//! Visualization utilities for TSP tours.
//!
//! Generates an SVG plot of a tour: visiting order as solid edges, the edge
//! back to the start dashed in red, every city labelled with its index.

use crate::error::{Result, TspError};
use crate::instance::TspInstance;
use crate::solution::Solution;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// Node radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            node_radius: 4.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate SVG visualization of a tour
    pub fn generate_svg(&self, instance: &TspInstance, solution: &Solution) -> String {
        let mut svg = String::new();

        let (min_x, max_x, min_y, max_y) = self.get_bounds(instance);

        let scale_x = (self.width - 2.0 * self.margin) / (max_x - min_x).max(1.0);
        let scale_y = (self.height - 2.0 * self.margin) / (max_y - min_y).max(1.0);
        let scale = scale_x.min(scale_y);

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .node {{ fill: #1f77b4; }}
    .edge {{ stroke: #1f77b4; stroke-width: 1.5; fill: none; }}
    .closing {{ stroke: #d62728; stroke-width: 1.5; stroke-dasharray: 6,4; fill: none; }}
    .label {{ font-family: Arial; font-size: 9px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ffffff"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r##"<text x="{}" y="25" class="title">Recorrido de ciudades | Costo total: {:.2}</text>
"##,
            self.margin, solution.cost
        ));

        let transform = |x: f64, y: f64| -> (f64, f64) {
            let tx = self.margin + (x - min_x) * scale;
            let ty = self.height - self.margin - (y - min_y) * scale;
            (tx, ty)
        };

        for hop in solution.trace(instance) {
            if hop.from == hop.to {
                continue;
            }
            let (x1, y1) = transform(instance.nodes[hop.from].x, instance.nodes[hop.from].y);
            let (x2, y2) = transform(instance.nodes[hop.to].x, instance.nodes[hop.to].y);
            let class = if hop.closing { "closing" } else { "edge" };

            svg.push_str(&format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="{}"/>
"#,
                x1, y1, x2, y2, class
            ));
        }

        for node in &instance.nodes {
            let (x, y) = transform(node.x, node.y);

            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="node"/>
"##,
                x, y, self.node_radius
            ));

            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label">{}</text>
"##,
                x + self.node_radius + 2.0,
                y - 2.0,
                node.display_index()
            ));
        }

        let legend_y = self.height - 20.0;
        svg.push_str(&format!(
            r##"
<line x1="{}" y1="{}" x2="{}" y2="{}" class="edge"/>
<text x="{}" y="{}" class="label">Ruta</text>
<line x1="{}" y1="{}" x2="{}" y2="{}" class="closing"/>
<text x="{}" y="{}" class="label">Regreso al inicio</text>
"##,
            self.margin, legend_y, self.margin + 20.0, legend_y,
            self.margin + 25.0, legend_y + 3.0,
            self.margin + 80.0, legend_y, self.margin + 100.0, legend_y,
            self.margin + 105.0, legend_y + 3.0
        ));

        svg.push_str("</svg>");

        svg
    }

    /// Save SVG to file
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> Result<()> {
        let path = path.as_ref();
        let to_err = |source| TspError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).map_err(to_err)?;
        file.write_all(svg.as_bytes()).map_err(to_err)?;
        Ok(())
    }

    /// Get coordinate bounds
    fn get_bounds(&self, instance: &TspInstance) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for node in &instance.nodes {
            min_x = min_x.min(node.x);
            max_x = max_x.max(node.x);
            min_y = min_y.min(node.y);
            max_y = max_y.max(node.y);
        }

        (min_x, max_x, min_y, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Node;

    fn create_test_instance() -> TspInstance {
        TspInstance::from_nodes(
            "test".to_string(),
            vec![
                Node::new(0, 1, 0.0, 0.0),
                Node::new(1, 2, 3.0, 4.0),
                Node::new(2, 3, 6.0, 8.0),
            ],
        )
    }

    #[test]
    fn test_visualizer() {
        let instance = create_test_instance();
        let solution = Solution::identity(&instance);

        let viz = Visualizer::new();
        let svg = viz.generate_svg(&instance, &solution);

        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Costo total: 20.00"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches(r#"class="edge"/>"#).count(), 2 + 1);
        assert_eq!(svg.matches(r#"class="closing"/>"#).count(), 1 + 1);
    }

    #[test]
    fn test_single_node_has_no_edges() {
        let instance = TspInstance::from_nodes("one".to_string(), vec![Node::new(0, 1, 1.0, 1.0)]);
        let solution = Solution::identity(&instance);
        let svg = Visualizer::new().generate_svg(&instance, &solution);

        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches(r#"class="closing"/>"#).count(), 1);
    }
}
