//! Experience Layout - layout engine for hierarchical experience maps
//!
//! An experience map is a tree of nodes (person → category → experience →
//! episode → detail). This library assigns 2D coordinates to such a tree under
//! one of several strategies: radial, symmetric tree, force-directed and
//! orthogonal branch.
//!
//! # Example
//!
//! ```rust
//! use experience_layout::{compute_layout, LayoutConfig, Node};
//!
//! let nodes = vec![
//!     Node::center(0.0, 0.0),
//!     Node::new("work", Some("center"), 1),
//!     Node::new("study", Some("center"), 1),
//! ];
//! let outcome = compute_layout(&nodes, "radial", &LayoutConfig::default());
//! assert!(outcome.is_ok());
//! assert_eq!(outcome.nodes[1].x, 300.0);
//! assert_eq!(outcome.nodes[2].x, -300.0);
//! ```

pub mod document;
pub mod layout;
pub mod node;

pub use document::DocumentError;
pub use layout::{
    compute, compute_layout, ConfigError, LayoutConfig, LayoutOutcome, LayoutType, LayoutWarning,
};
pub use node::{Node, NodeType};
