//! Deterministic radial placement used when no saved position exists
//!
//! Rings are concentric around the canvas center, one per depth. The
//! root's children share the full circle starting straight up; every other
//! node's children fan out over a fixed arc centered on that node's own
//! heading. Positions depend only on tree shape.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::Position;
use crate::constants::layout::{CHILD_ARC_DEGREES, GRAPH_SIZE, RING_SPACING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    /// Side of the square canvas
    pub size: f64,
    /// Distance between rings as a fraction of `size`
    pub ring_spacing: f64,
    /// Arc shared by the children of a non-root node, in radians
    pub child_arc: f64,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            size: GRAPH_SIZE,
            ring_spacing: RING_SPACING,
            child_arc: CHILD_ARC_DEGREES.to_radians(),
        }
    }
}

impl RadialLayout {
    pub fn center(&self) -> Position {
        Position {
            x: self.size / 2.0,
            y: self.size / 2.0,
        }
    }

    pub fn ring_radius(&self, depth: usize) -> f64 {
        self.size * self.ring_spacing * depth as f64
    }

    /// Headings for `count` children of a node.
    ///
    /// `parent_heading` is `None` for the root.
    pub fn child_headings(&self, parent_heading: Option<f64>, count: usize) -> Vec<f64> {
        match (parent_heading, count) {
            (_, 0) => Vec::new(),
            (None, n) => (0..n)
                .map(|j| -FRAC_PI_2 + TAU * j as f64 / n as f64)
                .collect(),
            (Some(heading), 1) => vec![heading],
            (Some(heading), n) => {
                let start = heading - self.child_arc / 2.0;
                let step = self.child_arc / (n - 1) as f64;
                (0..n).map(|j| start + step * j as f64).collect()
            }
        }
    }

    pub fn place(&self, depth: usize, heading: f64) -> Position {
        let center = self.center();
        let radius = self.ring_radius(depth);
        Position {
            x: center.x + heading.cos() * radius,
            y: center.y + heading.sin() * radius,
        }
    }
}
