// File: crates/chart-core/src/grid.rs
// Summary: Grid line options and tick/label layout helpers.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Cartesian grid behind the plot. Horizontal lines follow the y ticks,
/// vertical lines follow the x categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub stroke: Option<Color>,
    pub dash: String,
    pub horizontal: bool,
    pub vertical: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { stroke: None, dash: "3 3".to_string(), horizontal: true, vertical: false }
    }
}

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|i| {
            let t = i as f64 / last;
            start * (1.0 - t) + end * t
        })
        .collect()
}

/// Indices of x labels to draw. Long sequences (more than `max_dense`) keep every other label.
pub fn thinned_label_indices(count: usize, max_dense: usize) -> Vec<usize> {
    (0..count).filter(|i| count <= max_dense || i % 2 == 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 4.0, 1), vec![2.0, 4.0]);
    }

    #[test]
    fn labels_thin_only_past_threshold() {
        assert_eq!(thinned_label_indices(4, 10), vec![0, 1, 2, 3]);
        assert_eq!(thinned_label_indices(11, 10), vec![0, 2, 4, 6, 8, 10]);
        assert!(thinned_label_indices(0, 10).is_empty());
    }
}
