//! Reading and writing experience map documents
//!
//! A document is either a JSON array of nodes, a JSON object with a `nodes`
//! array, or a TOML file with `[[nodes]]` tables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::Node;

/// Errors that can occur when loading or saving map documents
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read map document: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse map document JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to parse map document TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Input format of a map document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct MapDocument {
    nodes: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Bare(Vec<Node>),
    Wrapped(MapDocument),
}

/// Load nodes from a file, picking the format from its extension
pub fn read_file(path: &Path) -> Result<Vec<Node>, DocumentError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content, DocumentFormat::from_path(path))
}

/// Parse nodes from a string
pub fn parse(content: &str, format: DocumentFormat) -> Result<Vec<Node>, DocumentError> {
    match format {
        DocumentFormat::Json => match serde_json::from_str::<JsonDocument>(content)? {
            JsonDocument::Bare(nodes) => Ok(nodes),
            JsonDocument::Wrapped(doc) => Ok(doc.nodes),
        },
        DocumentFormat::Toml => Ok(toml::from_str::<MapDocument>(content)?.nodes),
    }
}

/// Serialize nodes as a JSON array
pub fn to_json(nodes: &[Node], pretty: bool) -> Result<String, DocumentError> {
    let json = if pretty {
        serde_json::to_string_pretty(nodes)?
    } else {
        serde_json::to_string(nodes)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_json_array() {
        let nodes = parse(
            r#"[{ "id": "center", "level": 0 }, { "id": "a", "parentId": "center", "level": 1 }]"#,
            DocumentFormat::Json,
        )
        .expect("Should parse");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].parent_id.as_deref(), Some("center"));
    }

    #[test]
    fn test_parse_wrapped_json() {
        let nodes = parse(r#"{ "nodes": [{ "id": "center", "level": 0 }] }"#, DocumentFormat::Json)
            .expect("Should parse");
        assert_eq!(nodes[0].id, "center");
    }

    #[test]
    fn test_parse_toml() {
        let nodes = parse(
            r#"
[[nodes]]
id = "center"
level = 0
nodeType = "center"

[[nodes]]
id = "work"
parentId = "center"
level = 1
nodeType = "category"
x = 10.5
"#,
            DocumentFormat::Toml,
        )
        .expect("Should parse");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].x, 10.5);
    }

    #[test]
    fn test_invalid_json_error() {
        let result = parse("{ nope", DocumentFormat::Json);
        assert!(matches!(result, Err(DocumentError::JsonError(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("map.TOML")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("map.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("map")), DocumentFormat::Json);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&[Node::center(1.0, 2.0)], false).unwrap();
        assert!(json.starts_with("[{\"id\":\"center\""));
    }
}
