//! Radial ("XMind") layout
//!
//! The root's direct children form two vertical stacks, one on each side of
//! the root. Deeper levels keep their parent's side and step further outward
//! at a fixed distance, so branches stay parallel instead of fanning out.
//!
//! Collision handling is greedy: nodes are placed one at a time in input order
//! and a new node is pushed vertically away from whatever it would crowd. The
//! first node placed keeps its spot.

use log::debug;

use super::config::ResolvedSpacing;
use super::context::LayoutContext;
use super::tree::NodeIdx;
use super::types::{BoundingBox, Point, Side};

/// Default distances: `radial` is the root-to-stack distance, `vertical` the
/// spacing of main topics, `horizontal` the step between deeper levels.
pub const DEFAULTS: ResolvedSpacing = ResolvedSpacing {
    horizontal: 130.0,
    vertical: 160.0,
    radial: 300.0,
};

/// Slack for floating point comparisons of distances
const EPSILON: f64 = 1e-6;

/// Compute radial positions for every node reachable from the root.
pub fn layout(ctx: &LayoutContext) -> Vec<Point> {
    let spacing = ctx.config.spacing.resolve(DEFAULTS);
    let min_distance = ctx.config.min_node_distance();
    let mut placement = Placement::seed(ctx);

    let root_children = ctx.index.children_of(ctx.root);
    if root_children.is_empty() {
        return placement.positions;
    }

    let root_pos = placement.positions[ctx.root];
    for side in [Side::Right, Side::Left] {
        let stack: Vec<NodeIdx> = root_children
            .iter()
            .enumerate()
            .filter(|(i, _)| Side::for_index(*i) == side)
            .map(|(_, &c)| c)
            .collect();
        placement.place_group(
            ctx,
            root_pos,
            &stack,
            Offset {
                dx: side.sign() * spacing.radial,
                sibling_gap: spacing.vertical,
                min_distance,
            },
        );
    }

    let sub_gap = min_distance.max(spacing.vertical / 2.0);
    for (i, &child) in root_children.iter().enumerate() {
        let offset = Offset {
            dx: Side::for_index(i).sign() * spacing.horizontal,
            sibling_gap: sub_gap,
            min_distance,
        };
        place_branch(ctx, &mut placement, child, offset);
    }

    recenter_vertically(ctx, &mut placement.positions, min_distance);
    placement.positions
}

/// Horizontal step and vertical spacing for one group of siblings
#[derive(Debug, Clone, Copy)]
struct Offset {
    dx: f64,
    sibling_gap: f64,
    min_distance: f64,
}

/// Positions plus the obstacles placed so far, in placement order.
#[derive(Debug)]
struct Placement {
    positions: Vec<Point>,
    obstacles: Vec<NodeIdx>,
}

impl Placement {
    /// Start with the root and every pinned node as obstacles
    fn seed(ctx: &LayoutContext) -> Self {
        let members = ctx.members();
        let pinned: Vec<NodeIdx> = members
            .iter()
            .copied()
            .filter(|&i| i != ctx.root && ctx.is_frozen(i))
            .collect();

        let mut obstacles = vec![ctx.root];
        obstacles.extend(pinned);
        Self {
            positions: ctx.initial_positions(),
            obstacles,
        }
    }

    /// Spread `group` vertically around `anchor.y` at `anchor.x + dx`.
    fn place_group(&mut self, ctx: &LayoutContext, anchor: Point, group: &[NodeIdx], offset: Offset) {
        let span = (group.len().saturating_sub(1)) as f64 * offset.sibling_gap;
        let top = anchor.y - span / 2.0;
        let x = anchor.x + offset.dx;

        for (j, &idx) in group.iter().enumerate() {
            if ctx.is_frozen(idx) {
                continue;
            }
            let wanted = Point::new(x, top + j as f64 * offset.sibling_gap);
            let y = self.clear_y(wanted, offset.min_distance);
            self.positions[idx] = Point::new(x, y);
            self.obstacles.push(idx);
        }
    }

    /// Vertical position closest to `wanted.y` that keeps `min_distance` from
    /// every obstacle. Nodes sharing the column need a vertical gap, all
    /// others a Euclidean one; both reduce to the same distance test. The push
    /// direction is fixed by the first conflict, which makes the search
    /// monotone.
    fn clear_y(&self, wanted: Point, min_distance: f64) -> f64 {
        let mut y = wanted.y;
        let mut direction: Option<f64> = None;

        for _ in 0..=self.obstacles.len() {
            let candidate = Point::new(wanted.x, y);
            let conflict = self
                .obstacles
                .iter()
                .map(|&o| self.positions[o])
                .find(|p| p.distance(candidate) < min_distance - EPSILON);

            let Some(other) = conflict else {
                return y;
            };
            let dir = *direction.get_or_insert(if y >= other.y { 1.0 } else { -1.0 });
            y = other.y + dir * min_distance;
        }
        y
    }
}

/// Place the children of `parent`, then recurse into each child.
fn place_branch(ctx: &LayoutContext, placement: &mut Placement, parent: NodeIdx, offset: Offset) {
    let children = ctx.index.children_of(parent);
    if children.is_empty() {
        return;
    }
    let anchor = placement.positions[parent];
    placement.place_group(ctx, anchor, children, offset);
    for &child in children {
        place_branch(ctx, placement, child, offset);
    }
}

/// Move the free part of the diagram vertically so its bounding box is
/// centered on the root's `y`.
///
/// Only `y` changes. The layout is never centered horizontally and the root
/// never moves. Pinned nodes and their descendants stay put and are left out of
/// the box. When the shift would bring a free node within `min_distance` of the
/// root or of a pinned node, the layout is left uncentered.
fn recenter_vertically(ctx: &LayoutContext, positions: &mut [Point], min_distance: f64) {
    let anchored = ctx.anchored();
    let (free, fixed): (Vec<NodeIdx>, Vec<NodeIdx>) = ctx
        .members()
        .into_iter()
        .partition(|&i| i != ctx.root && !anchored[i]);

    let Some(bounds) = BoundingBox::enclosing(free.iter().map(|&i| positions[i])) else {
        return;
    };
    let dy = positions[ctx.root].y - bounds.center().y;
    if dy.abs() < EPSILON {
        return;
    }

    let crowds_fixed = free.iter().any(|&i| {
        let shifted = Point::new(positions[i].x, positions[i].y + dy);
        fixed
            .iter()
            .any(|&f| positions[f].distance(shifted) < min_distance - EPSILON)
    });
    if crowds_fixed {
        debug!("radial layout: recentering by {:.1} would crowd a fixed node, skipped", dy);
        return;
    }

    for idx in free {
        positions[idx].y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::LayoutConfig;
    use crate::node::Node;

    fn run(nodes: &[Node], config: &LayoutConfig) -> Vec<Point> {
        let root = crate::layout::tree::find_center_index(nodes).unwrap();
        layout(&LayoutContext::new(nodes, root, config))
    }

    #[test]
    fn test_main_topics_split_into_stacks() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("b", Some("center"), 1),
            Node::new("c", Some("center"), 1),
            Node::new("d", Some("center"), 1),
        ];
        let pos = run(&nodes, &LayoutConfig::default());
        // a, c right; b, d left; each stack centered on the root
        assert_eq!(pos[1], Point::new(300.0, -80.0));
        assert_eq!(pos[3], Point::new(300.0, 80.0));
        assert_eq!(pos[2], Point::new(-300.0, -80.0));
        assert_eq!(pos[4], Point::new(-300.0, 80.0));
        assert_eq!(pos[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_deeper_levels_keep_side() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("r", Some("center"), 1),
            Node::new("l", Some("center"), 1),
            Node::new("r1", Some("r"), 2),
            Node::new("l1", Some("l"), 2),
            Node::new("l11", Some("l1"), 3),
        ];
        let pos = run(&nodes, &LayoutConfig::default());
        assert_eq!(pos[3].x, 430.0);
        assert_eq!(pos[4].x, -430.0);
        assert_eq!(pos[5].x, -560.0);
        assert_eq!(pos[3].y, pos[1].y);
        assert_eq!(pos[5].y, pos[4].y);
    }

    #[test]
    fn test_collision_pushes_cousins_apart() {
        // Two right-side topics whose children would share a column
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("skip", Some("center"), 1),
            Node::new("b", Some("center"), 1),
            Node::new("a1", Some("a"), 2),
            Node::new("a2", Some("a"), 2),
            Node::new("a3", Some("a"), 2),
            Node::new("b1", Some("b"), 2),
            Node::new("b2", Some("b"), 2),
            Node::new("b3", Some("b"), 2),
        ];
        let config = LayoutConfig::default();
        let pos = run(&nodes, &config);
        let column: Vec<Point> = (4..10).map(|i| pos[i]).collect();
        for (i, p) in column.iter().enumerate() {
            for q in &column[i + 1..] {
                assert!(p.distance(*q) >= config.min_node_distance() - 1e-6);
            }
        }
    }

    #[test]
    fn test_root_without_children() {
        let nodes = vec![Node::center(15.0, -5.0), Node::new("x", Some("ghost"), 1).at(1.0, 1.0)];
        let pos = run(&nodes, &LayoutConfig::default());
        assert_eq!(pos, vec![Point::new(15.0, -5.0), Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_pinned_node_anchors_descendants() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1).at(500.0, 400.0).pinned(),
            Node::new("a1", Some("a"), 2),
        ];
        let pos = run(&nodes, &LayoutConfig::default());
        assert_eq!(pos[1], Point::new(500.0, 400.0));
        assert_eq!(pos[2], Point::new(630.0, 400.0));
    }

    #[test]
    fn test_recentering_keeps_root() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("skip", Some("center"), 1),
            Node::new("b", Some("center"), 1),
            Node::new("a1", Some("a"), 2),
            Node::new("b1", Some("b"), 2),
            Node::new("b2", Some("b"), 2),
        ];
        let pos = run(&nodes, &LayoutConfig::default());
        assert_eq!(pos[0], Point::new(0.0, 0.0));
        let bounds = BoundingBox::enclosing(pos.iter().copied()).unwrap();
        assert!(bounds.center().y.abs() < 1e-6);
    }

    #[test]
    fn test_recentering_ignores_distant_pin() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("p", Some("center"), 1).at(-300.0, 1000.0).pinned(),
        ];
        let pos = run(&nodes, &LayoutConfig::default());
        assert_eq!(pos[1], Point::new(300.0, 0.0));
        assert_eq!(pos[2], Point::new(-300.0, 1000.0));
    }

    #[test]
    fn test_recentering_keeps_clear_of_pins() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("x", Some("center"), 1).at(-300.0, -600.0).pinned(),
            Node::new("b", Some("center"), 1).at(300.0, 100.0).pinned(),
        ];
        let config = LayoutConfig::default();
        let pos = run(&nodes, &config);
        // a is placed at y = -80, then moved down to center on the root
        assert_eq!(pos[1], Point::new(300.0, 0.0));
        assert!(pos[1].distance(pos[3]) >= config.min_node_distance());
    }

    #[test]
    fn test_recentering_skipped_when_it_would_crowd_a_pin() {
        let nodes = vec![
            Node::center(0.0, 0.0),
            Node::new("a", Some("center"), 1),
            Node::new("x", Some("center"), 1).at(-300.0, 0.0).pinned(),
            Node::new("b", Some("center"), 1).at(300.0, 60.0).pinned(),
        ];
        let pos = run(&nodes, &LayoutConfig::default());
        // centering a would leave it 60 from b
        assert_eq!(pos[1], Point::new(300.0, -80.0));
        assert_eq!(pos[3], Point::new(300.0, 60.0));
    }
}
