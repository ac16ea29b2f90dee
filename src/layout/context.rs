//! Per-call state handed to every layout strategy

use crate::node::Node;

use super::config::LayoutConfig;
use super::tree::{NodeIdx, TreeIndex};
use super::types::Point;

/// Read-only view of one layout request: the tree, its root and the config.
///
/// Strategies return a position buffer parallel to the input slice; the input
/// nodes themselves are never touched.
#[derive(Debug)]
pub struct LayoutContext<'a> {
    pub index: TreeIndex<'a>,
    pub root: NodeIdx,
    pub config: &'a LayoutConfig,
}

impl<'a> LayoutContext<'a> {
    pub fn new(nodes: &'a [Node], root: NodeIdx, config: &'a LayoutConfig) -> Self {
        Self {
            index: TreeIndex::rooted_at(nodes, root),
            root,
            config,
        }
    }

    /// Whether a node must keep its input coordinates
    pub fn is_frozen(&self, idx: NodeIdx) -> bool {
        self.config.preserve_manual_positions && self.index.node(idx).is_manually_positioned
    }

    /// Positions as given in the input
    pub fn initial_positions(&self) -> Vec<Point> {
        (0..self.index.len())
            .map(|i| Point::of(self.index.node(i)))
            .collect()
    }

    /// Root followed by every node reachable from it, in input order
    pub fn members(&self) -> Vec<NodeIdx> {
        let mut members = self.index.descendants(self.root);
        members.sort_unstable();
        members
    }

    /// Nodes that are frozen or sit below a frozen node.
    pub fn anchored(&self) -> Vec<bool> {
        let mut anchored = vec![false; self.index.len()];
        for idx in self.index.descendants(self.root) {
            if self.is_frozen(idx) {
                for d in self.index.descendants(idx) {
                    anchored[d] = true;
                }
            }
        }
        anchored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_respects_config() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1).pinned(),
        ];
        let keep = LayoutConfig::default();
        let ctx = LayoutContext::new(&nodes, 0, &keep);
        assert!(ctx.is_frozen(1));

        let ignore = LayoutConfig::default().with_preserve_manual_positions(false);
        let ctx = LayoutContext::new(&nodes, 0, &ignore);
        assert!(!ctx.is_frozen(1));
    }

    #[test]
    fn test_members_in_input_order() {
        let nodes = vec![
            Node::new("a1", Some("a"), 2),
            Node::center(0.0, 0.0),
            Node::new("orphan", Some("ghost"), 1),
            Node::new("a", Some("center"), 1),
        ];
        let config = LayoutConfig::default();
        let ctx = LayoutContext::new(&nodes, 1, &config);
        assert_eq!(ctx.members(), vec![0, 1, 3]);
    }

    #[test]
    fn test_anchored_covers_pinned_subtrees() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1).pinned(),
            Node::new("a1", Some("a"), 2),
            Node::new("b", Some("center"), 1),
        ];
        let config = LayoutConfig::default();
        let ctx = LayoutContext::new(&nodes, 0, &config);
        assert_eq!(ctx.anchored(), vec![false, true, true, false]);
    }
}
