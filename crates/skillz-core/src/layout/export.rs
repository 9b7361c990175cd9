//! Live node positions -> saved layout

use serde::{Deserialize, Serialize};

use super::{GraphNode, LayoutMap, Position};

/// Anything with an id and a current canvas position
pub trait Positioned {
    fn id(&self) -> &str;
    fn position(&self) -> Position;
}

/// Node as reported by an editing surface after drags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveNode {
    pub id: String,
    pub position: Position,
}

impl Positioned for LiveNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl Positioned for GraphNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Halves round toward positive infinity on both sides of zero
fn round_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Record every node's position, rounded to one decimal place.
/// No node is skipped, whatever its coordinates.
pub fn export_layout<'a, N, I>(nodes: I) -> LayoutMap
where
    N: Positioned + 'a,
    I: IntoIterator<Item = &'a N>,
{
    nodes
        .into_iter()
        .map(|node| {
            let Position { x, y } = node.position();
            (node.id().to_string(), Position::new(round_tenth(x), round_tenth(y)))
        })
        .collect()
}
