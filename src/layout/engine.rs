//! Layout dispatcher
//!
//! Maps a layout identifier to a strategy and turns the strategy's position
//! buffer back into a node list. Nothing here can fail: problems are reported
//! as [`LayoutWarning`]s next to the (possibly untouched) nodes.
//!
//! ## Key Functions
//!
//! - [`compute_layout`]: entry point taking the renderer's layout token
//! - [`compute`]: same, with an already parsed [`LayoutType`]

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::node::Node;

use super::config::LayoutConfig;
use super::context::LayoutContext;
use super::error::LayoutWarning;
use super::tree::find_center_index;
use super::types::Point;
use super::{force, orthogonal, radial, symmetric};

/// Available layout strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutType {
    /// Two vertical stacks beside the root with parallel branches
    #[default]
    Radial,
    /// Classic centered top-down tree
    Tree,
    /// Physics simulation with a pinned root
    ForceDirected,
    /// Alternating left/right branches with right-angle connectors
    Orthogonal,
}

impl LayoutType {
    pub const ALL: [LayoutType; 4] = [
        LayoutType::Radial,
        LayoutType::Tree,
        LayoutType::ForceDirected,
        LayoutType::Orthogonal,
    ];

    /// Canonical token
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutType::Radial => "radial",
            LayoutType::Tree => "tree",
            LayoutType::ForceDirected => "force-directed",
            LayoutType::Orthogonal => "orthogonal",
        }
    }

    /// Resolve a token leniently: retired and unknown tokens fall back to
    /// [`LayoutType::Radial`] together with a warning.
    pub fn from_token(token: &str) -> (Self, Option<LayoutWarning>) {
        match token.parse::<LayoutType>() {
            Ok(layout) => (layout, None),
            Err(warning) => (LayoutType::Radial, Some(warning)),
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = LayoutWarning;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let fallback = LayoutType::Radial.as_str();
        match token.trim().to_ascii_lowercase().as_str() {
            "radial" | "xmind" | "mindmap" => Ok(LayoutType::Radial),
            "tree" | "symmetric" => Ok(LayoutType::Tree),
            "force-directed" | "force" => Ok(LayoutType::ForceDirected),
            "orthogonal" | "branch" => Ok(LayoutType::Orthogonal),
            "hierarchical" => Err(LayoutWarning::deprecated(token, fallback)),
            _ => Err(LayoutWarning::unknown(token, fallback)),
        }
    }
}

/// Nodes with updated coordinates plus anything worth telling the caller
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub nodes: Vec<Node>,
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutOutcome {
    fn clean(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            warnings: Vec::new(),
        }
    }

    /// True when the layout ran without any warning
    pub fn is_ok(&self) -> bool {
        self.warnings.is_empty()
    }

    /// True when layout was skipped and the nodes are an unchanged copy
    pub fn is_unchanged(&self) -> bool {
        self.warnings.iter().any(LayoutWarning::is_fatal)
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Lay out `nodes` with the strategy named by `layout_type`.
///
/// Unknown or retired identifiers fall back to the radial layout.
pub fn compute_layout(nodes: &[Node], layout_type: &str, config: &LayoutConfig) -> LayoutOutcome {
    let (layout, fallback) = LayoutType::from_token(layout_type);
    let mut outcome = compute(nodes, layout, config);
    if let Some(warning) = fallback {
        warn!("{}", warning);
        outcome.warnings.insert(0, warning);
    }
    outcome
}

/// Lay out `nodes` with the given strategy.
///
/// The result has the same length and order as the input and only `x`/`y`
/// differ. Without a center node the input is returned unchanged.
pub fn compute(nodes: &[Node], layout: LayoutType, config: &LayoutConfig) -> LayoutOutcome {
    if nodes.is_empty() {
        return LayoutOutcome::clean(Vec::new());
    }

    let Some(root) = find_center_index(nodes) else {
        let warning = LayoutWarning::missing_root(nodes.len());
        warn!("{}", warning);
        return LayoutOutcome {
            nodes: nodes.to_vec(),
            warnings: vec![warning],
        };
    };

    debug!(
        "{} layout: {} nodes, root '{}'",
        layout,
        nodes.len(),
        nodes[root].id
    );

    let ctx = LayoutContext::new(nodes, root, config);
    let positions = match layout {
        LayoutType::Radial => radial::layout(&ctx),
        LayoutType::Tree => symmetric::layout(&ctx),
        LayoutType::ForceDirected => force::layout(&ctx),
        LayoutType::Orthogonal => orthogonal::layout(&ctx),
    };

    LayoutOutcome::clean(apply_positions(&ctx, &positions))
}

/// Copy the input nodes, writing new coordinates into every node that may move.
fn apply_positions(ctx: &LayoutContext, positions: &[Point]) -> Vec<Node> {
    (0..ctx.index.len())
        .map(|i| {
            let mut node = ctx.index.node(i).clone();
            if !ctx.is_frozen(i) {
                node.x = positions[i].x;
                node.y = positions[i].y;
            }
            node
        })
        .collect()
}
