//! Lint pass for detecting layout defects in experience maps.
//!
//! Runs after layout to flag mechanical issues: nodes crowding each other
//! and nodes the engine could not place because they hang off no known parent.

use std::fmt;

use crate::node::Node;

use super::tree::{find_center_index, TreeIndex};
use super::types::Point;

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Crowded,
    Unplaced,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Crowded => write!(f, "crowded"),
            LintCategory::Unplaced => write!(f, "unplaced"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all lint checks on a completed layout.
pub fn check(nodes: &[Node], min_distance: f64) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_unplaced(nodes, &mut warnings);
    check_crowding(nodes, min_distance, &mut warnings);
    warnings
}

/// Nodes not reachable from the center node keep whatever coordinates they had.
fn check_unplaced(nodes: &[Node], warnings: &mut Vec<LintWarning>) {
    let Some(root) = find_center_index(nodes) else {
        return;
    };
    let index = TreeIndex::rooted_at(nodes, root);
    let mut reachable = vec![false; nodes.len()];
    for idx in index.descendants(root) {
        reachable[idx] = true;
    }

    for (node, _) in nodes.iter().zip(reachable).filter(|(_, r)| !r) {
        let parent = node.parent_id.as_deref().unwrap_or("<none>");
        warnings.push(LintWarning {
            category: LintCategory::Unplaced,
            message: format!(
                "'{}' is not connected to the center node (parent '{}')",
                node.id, parent
            ),
        });
    }
}

/// Pairs of nodes whose centers are closer than the node footprint.
fn check_crowding(nodes: &[Node], min_distance: f64, warnings: &mut Vec<LintWarning>) {
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let distance = Point::of(a).distance(Point::of(b));
            if distance < min_distance - 1e-6 {
                warnings.push(LintWarning {
                    category: LintCategory::Crowded,
                    message: format!(
                        "'{}' and '{}' are {:.1} apart (minimum {:.1})",
                        a.id, b.id, distance, min_distance
                    ),
                });
            }
        }
    }
}
