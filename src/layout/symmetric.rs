//! Symmetric top-down tree layout
//!
//! Every subtree gets a horizontal slice as wide as the sum of its leaves;
//! children are laid out left to right under their parent and centered on it.
//! Slices never overlap, so no collision pass is needed as long as the leaf
//! width is at least the node footprint.

use super::config::ResolvedSpacing;
use super::context::LayoutContext;
use super::tree::NodeIdx;
use super::types::Point;

/// `horizontal` is the width of a leaf slice, `vertical` the gap between
/// levels. `radial` is unused.
pub const DEFAULTS: ResolvedSpacing = ResolvedSpacing {
    horizontal: 200.0,
    vertical: 150.0,
    radial: 0.0,
};

pub fn layout(ctx: &LayoutContext) -> Vec<Point> {
    let spacing = ctx.config.spacing.resolve(DEFAULTS);
    let mut positions = ctx.initial_positions();
    place_children(ctx, ctx.root, spacing, &mut positions);
    positions
}

fn place_children(
    ctx: &LayoutContext,
    parent: NodeIdx,
    spacing: ResolvedSpacing,
    positions: &mut [Point],
) {
    let children = ctx.index.children_of(parent);
    if children.is_empty() {
        return;
    }

    let anchor = positions[parent];
    let widths: Vec<f64> = children
        .iter()
        .map(|&c| ctx.index.subtree_width(c, spacing.horizontal))
        .collect();
    let total: f64 = widths.iter().sum();

    let mut left = anchor.x - total / 2.0;
    for (&child, width) in children.iter().zip(widths) {
        if !ctx.is_frozen(child) {
            positions[child] = Point::new(left + width / 2.0, anchor.y + spacing.vertical);
        }
        left += width;
        place_children(ctx, child, spacing, positions);
    }
}
