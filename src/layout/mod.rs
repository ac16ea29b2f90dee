//! Layout engine for experience maps
//!
//! Takes a flat node list, a strategy and a configuration and computes new
//! coordinates. Pure: no I/O, no state between calls, topology untouched.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod force;
pub mod lint;
pub mod orthogonal;
pub mod radial;
pub mod symmetric;
pub mod tree;
pub mod types;

pub use config::{ConfigError, LayoutConfig, Spacing};
pub use engine::{compute, compute_layout, LayoutOutcome, LayoutType};
pub use error::LayoutWarning;
pub use tree::{build_tree, collect_descendant_ids, find_center_node, TreeIndex};
pub use types::*;

use crate::node::Node;

/// Bounding box of all node centers, for renderers fitting the view
pub fn bounding_box(nodes: &[Node]) -> Option<BoundingBox> {
    BoundingBox::enclosing(nodes.iter().map(Point::of))
}
