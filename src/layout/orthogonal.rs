//! Orthogonal branch layout
//!
//! The root's children alternate between a right and a left branch. Within a
//! branch every node sits one horizontal step further out than its parent and
//! siblings stack vertically inside the height their subtrees need, which keeps
//! connectors strictly horizontal/vertical.

use super::config::ResolvedSpacing;
use super::context::LayoutContext;
use super::tree::NodeIdx;
use super::types::{Point, Side};

/// `horizontal` is the step between levels, `vertical` the height of a leaf
/// slot. `radial` is unused.
pub const DEFAULTS: ResolvedSpacing = ResolvedSpacing {
    horizontal: 240.0,
    vertical: 100.0,
    radial: 0.0,
};

pub fn layout(ctx: &LayoutContext) -> Vec<Point> {
    let spacing = ctx.config.spacing.resolve(DEFAULTS);
    let mut positions = ctx.initial_positions();

    let root_children = ctx.index.children_of(ctx.root);
    for side in [Side::Right, Side::Left] {
        let branch: Vec<NodeIdx> = root_children
            .iter()
            .enumerate()
            .filter(|(i, _)| Side::for_index(*i) == side)
            .map(|(_, &c)| c)
            .collect();
        stack(ctx, ctx.root, &branch, side, spacing, &mut positions);
    }
    positions
}

/// Stack `members` to the `side` of `parent`, centered on the parent's `y`,
/// then recurse into each member.
fn stack(
    ctx: &LayoutContext,
    parent: NodeIdx,
    members: &[NodeIdx],
    side: Side,
    spacing: ResolvedSpacing,
    positions: &mut [Point],
) {
    if members.is_empty() {
        return;
    }

    let anchor = positions[parent];
    let heights: Vec<f64> = members
        .iter()
        .map(|&m| ctx.index.subtree_height(m, spacing.vertical))
        .collect();
    let total: f64 = heights.iter().sum();
    let x = anchor.x + side.sign() * spacing.horizontal;

    let mut top = anchor.y - total / 2.0;
    for (&member, height) in members.iter().zip(heights) {
        if !ctx.is_frozen(member) {
            positions[member] = Point::new(x, top + height / 2.0);
        }
        top += height;
        stack(ctx, member, ctx.index.children_of(member), side, spacing, positions);
    }
}
