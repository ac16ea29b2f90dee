//! Tree utilities shared by the layout strategies
//!
//! The producer's `children` field is not trusted: every strategy works on a
//! [`TreeIndex`] rebuilt from `parent_id` back-references. Child lists keep the
//! order of the input slice, which is what makes collision handling and the
//! force simulation deterministic.

use std::collections::{HashMap, HashSet};

use crate::node::{Node, NodeType};

/// Key under which parentless nodes are grouped by [`build_tree`]
pub const ROOT_KEY: &str = "root";

/// Well-known id of the center node
pub const CENTER_ID: &str = "center";

/// Group node ids by parent id.
///
/// Parentless nodes are listed under [`ROOT_KEY`]. Nodes whose parent id does
/// not name an existing node are orphans and appear nowhere.
pub fn build_tree(nodes: &[Node]) -> HashMap<String, Vec<String>> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut tree: HashMap<String, Vec<String>> = HashMap::new();

    for node in nodes {
        let key = match &node.parent_id {
            None => ROOT_KEY,
            Some(parent) if ids.contains(parent.as_str()) => parent.as_str(),
            Some(_) => continue,
        };
        tree.entry(key.to_string()).or_default().push(node.id.clone());
    }
    tree
}

/// Locate the center node.
///
/// Precedence: id `"center"`, then node type `center`, then level 0.
pub fn find_center_node(nodes: &[Node]) -> Option<&Node> {
    find_center_index(nodes).map(|i| &nodes[i])
}

pub(crate) fn find_center_index(nodes: &[Node]) -> Option<usize> {
    nodes
        .iter()
        .position(|n| n.id == CENTER_ID)
        .or_else(|| nodes.iter().position(|n| n.node_type == NodeType::Center))
        .or_else(|| nodes.iter().position(|n| n.level == 0))
}

/// Collect all descendants of `id` in pre-order by following the `children`
/// field. Each id is reported at most once, so stale cyclic data terminates.
pub fn collect_descendant_ids(id: &str, nodes: &[Node]) -> Vec<String> {
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(id);

    let mut out = Vec::new();
    let mut stack: Vec<&str> = match by_id.get(id) {
        Some(node) => node.children.iter().rev().map(String::as_str).collect(),
        None => return out,
    };

    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        out.push(current.to_string());
        if let Some(node) = by_id.get(current) {
            stack.extend(node.children.iter().rev().map(String::as_str));
        }
    }
    out
}

/// Index of a node inside the input slice
pub type NodeIdx = usize;

/// Arena view over a node slice: lookup by id plus parent/child links by index.
#[derive(Debug)]
pub struct TreeIndex<'a> {
    nodes: &'a [Node],
    by_id: HashMap<&'a str, NodeIdx>,
    parent: Vec<Option<NodeIdx>>,
    children: Vec<Vec<NodeIdx>>,
}

impl<'a> TreeIndex<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self::build(nodes, None)
    }

    /// Index whose traversal starts at `root`. Any parent link on `root` itself
    /// is ignored, so stale data cannot make the root its own descendant.
    pub fn rooted_at(nodes: &'a [Node], root: NodeIdx) -> Self {
        Self::build(nodes, Some(root))
    }

    fn build(nodes: &'a [Node], root: Option<NodeIdx>) -> Self {
        let mut by_id: HashMap<&str, NodeIdx> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            // First occurrence wins on duplicate ids
            by_id.entry(node.id.as_str()).or_insert(i);
        }

        let mut parent = vec![None; nodes.len()];
        let mut children = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            if root == Some(i) {
                continue;
            }
            let Some(pid) = node.parent_id.as_deref() else {
                continue;
            };
            match by_id.get(pid) {
                Some(&p) if p != i => {
                    parent[i] = Some(p);
                    children[p].push(i);
                }
                _ => {}
            }
        }

        Self {
            nodes,
            by_id,
            parent,
            children,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, idx: NodeIdx) -> &'a Node {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.by_id.get(id).copied()
    }

    pub fn parent_of(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.parent[idx]
    }

    pub fn children_of(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.children[idx]
    }

    pub fn is_leaf(&self, idx: NodeIdx) -> bool {
        self.children[idx].is_empty()
    }

    /// `idx` followed by all of its descendants, pre-order. Parent cycles in
    /// the input are cut at the first repeated node.
    pub fn descendants(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut seen = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if std::mem::replace(&mut seen[current], true) {
                continue;
            }
            out.push(current);
            stack.extend(self.children[current].iter().rev());
        }
        out
    }

    /// Horizontal extent of a subtree: leaves take `leaf_width`, inner nodes the
    /// sum of their children.
    pub fn subtree_width(&self, idx: NodeIdx, leaf_width: f64) -> f64 {
        if self.is_leaf(idx) {
            return leaf_width;
        }
        self.children[idx]
            .iter()
            .map(|&c| self.subtree_width(c, leaf_width))
            .sum()
    }

    /// Vertical extent of a subtree: leaves take `leaf_height`, inner nodes the
    /// sum of their children but never less than `leaf_height`.
    pub fn subtree_height(&self, idx: NodeIdx, leaf_height: f64) -> f64 {
        if self.is_leaf(idx) {
            return leaf_height;
        }
        let sum: f64 = self.children[idx]
            .iter()
            .map(|&c| self.subtree_height(c, leaf_height))
            .sum();
        sum.max(leaf_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Node> {
        vec![
            Node::new("b", Some("center"), 1),
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("b1", Some("b"), 2),
            Node::new("lost", Some("nowhere"), 3),
            Node::new("b2", Some("b"), 2),
        ]
    }

    #[test]
    fn test_build_tree_keeps_input_order() {
        let tree = build_tree(&sample());
        assert_eq!(tree[ROOT_KEY], vec!["center"]);
        assert_eq!(tree["center"], vec!["b", "a"]);
        assert_eq!(tree["b"], vec!["b1", "b2"]);
    }

    #[test]
    fn test_build_tree_drops_orphans() {
        let tree = build_tree(&sample());
        assert!(!tree.contains_key("nowhere"));
        assert!(tree.values().all(|ids| !ids.contains(&"lost".to_string())));
    }

    #[test]
    fn test_find_center_precedence() {
        let nodes = vec![
            Node::new("zero", None, 0),
            Node::new("typed", None, 0).with_type(NodeType::Center),
            Node::new("center", None, 3),
        ];
        assert_eq!(find_center_node(&nodes).unwrap().id, "center");
        assert_eq!(find_center_node(&nodes[..2]).unwrap().id, "typed");
        assert_eq!(find_center_node(&nodes[..1]).unwrap().id, "zero");
    }

    #[test]
    fn test_find_center_missing() {
        let nodes = vec![Node::new("a", Some("b"), 1)];
        assert!(find_center_node(&nodes).is_none());
    }

    #[test]
    fn test_collect_descendants_pre_order() {
        let mut nodes = vec![
            Node::new("r", None, 0),
            Node::new("a", Some("r"), 1),
            Node::new("b", Some("r"), 1),
            Node::new("a1", Some("a"), 2),
        ];
        nodes[0].children = vec!["a".into(), "b".into()];
        nodes[1].children = vec!["a1".into()];
        assert_eq!(collect_descendant_ids("r", &nodes), vec!["a", "a1", "b"]);
        assert!(collect_descendant_ids("missing", &nodes).is_empty());
    }

    #[test]
    fn test_collect_descendants_survives_cycles() {
        let mut nodes = vec![Node::new("a", None, 0), Node::new("b", Some("a"), 1)];
        nodes[0].children = vec!["b".into()];
        nodes[1].children = vec!["a".into(), "b".into()];
        assert_eq!(collect_descendant_ids("a", &nodes), vec!["b"]);
    }

    #[test]
    fn test_index_links() {
        let nodes = sample();
        let index = TreeIndex::new(&nodes);
        let center = index.index_of("center").unwrap();
        let b = index.index_of("b").unwrap();
        assert_eq!(index.children_of(center), &[0, 2]);
        assert_eq!(index.parent_of(b), Some(center));
        assert_eq!(index.parent_of(4), None);
        assert_eq!(index.descendants(center), vec![1, 0, 3, 5, 2]);
    }

    #[test]
    fn test_rooted_index_ignores_root_parent() {
        let nodes = vec![
            Node::new("center", Some("leaf"), 0),
            Node::new("leaf", Some("center"), 1),
        ];
        let index = TreeIndex::rooted_at(&nodes, 0);
        assert_eq!(index.parent_of(0), None);
        assert_eq!(index.descendants(0), vec![0, 1]);
    }

    #[test]
    fn test_subtree_metrics() {
        let nodes = sample();
        let index = TreeIndex::new(&nodes);
        let center = index.index_of("center").unwrap();
        // b has two leaves, a is a leaf
        assert_eq!(index.subtree_width(center, 100.0), 300.0);
        assert_eq!(index.subtree_height(center, 50.0), 150.0);
        assert_eq!(index.subtree_height(0, 50.0), 100.0);
    }

    #[test]
    fn test_subtree_height_floor() {
        let nodes = vec![Node::new("r", None, 0), Node::new("c", Some("r"), 1)];
        let index = TreeIndex::new(&nodes);
        assert_eq!(index.subtree_height(0, 80.0), 80.0);
    }
}
