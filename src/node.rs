//! Node records of an experience map
//!
//! Nodes arrive as a flat list linked through `parent_id`. The layout engine
//! only ever rewrites `x` and `y`; every other field is read-only input.

use serde::{Deserialize, Serialize};

/// Kind of node in an experience map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// The person at the center of the map
    #[serde(alias = "root")]
    Center,
    Category,
    Experience,
    Episode,
    Detail,
    #[default]
    #[serde(other)]
    Other,
}

/// A single node of an experience map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub parent_id: Option<String>,

    /// Child ids as recorded by the producer. Often stale; layout builds its
    /// own index from `parent_id` instead.
    #[serde(default)]
    pub children: Vec<String>,

    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    /// Depth from the root (root = 0)
    pub level: u32,

    #[serde(default)]
    pub node_type: NodeType,

    #[serde(default)]
    pub is_manually_positioned: bool,
}

impl Node {
    /// Create a node at the origin
    pub fn new(id: impl Into<String>, parent_id: Option<&str>, level: u32) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            parent_id: parent_id.map(str::to_string),
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            level,
            node_type: NodeType::default(),
            is_manually_positioned: false,
        }
    }

    /// Create the center node of a map
    pub fn center(x: f64, y: f64) -> Self {
        Self::new("center", None, 0)
            .with_type(NodeType::Center)
            .at(x, y)
    }

    /// Set the coordinates
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the node type
    pub fn with_type(mut self, node_type: NodeType) -> Self {
        self.node_type = node_type;
        self
    }

    /// Mark the node as placed by hand
    pub fn pinned(mut self) -> Self {
        self.is_manually_positioned = true;
        self
    }
}
