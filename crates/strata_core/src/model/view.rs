//! View presentation shapes.
//!
//! Views reference elements and relationships by id and carry purely visual
//! state (positions, sizes, styling). The core only defines and validates the
//! serialized shape; layout and rendering live outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ident;

/// A 2D coordinate used for waypoints and label offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A visual presentation of model content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Stable identifier, `view-<uuid>` when generated here.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional viewpoint id restricting which types belong on this view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Visual nodes, each referencing one element.
    pub nodes: Vec<ViewNode>,
    /// Visual edges, each referencing one relationship.
    pub edges: Vec<ViewEdge>,
    /// Grouping rectangles.
    pub groups: Vec<ViewGroup>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl View {
    /// Creates an empty view with a generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ident::view_id(),
            name: name.into(),
            viewpoint: None,
            documentation: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            groups: Vec::new(),
            created: now,
            modified: now,
        }
    }
}

/// A node on a view, referencing an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    pub id: String,
    /// Element shown by this node.
    pub element_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    /// Nested child node ids (composition).
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Styling overrides for one node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// An edge on a view, referencing a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEdge {
    pub id: String,
    /// Relationship shown by this edge.
    pub relationship_id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    /// Intermediate routing points.
    pub waypoints: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_position: Option<Point>,
}

/// Styling overrides for one edge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

/// Line rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// A grouping rectangle containing view nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewGroup {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Ids of nodes contained in this group.
    pub node_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<GroupStyle>,
}

/// Styling overrides for one group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Point, View, ViewEdge, ViewNode};

    #[test]
    fn empty_view_round_trips_through_json() {
        let view = View::new("Application landscape");
        let json = serde_json::to_string(&view).expect("view should serialize");
        let back: View = serde_json::from_str(&json).expect("view should parse");
        assert_eq!(back, view);
    }

    #[test]
    fn node_and_edge_references_use_wire_names() {
        let node = ViewNode {
            id: "n1".to_string(),
            element_id: "elem-a".to_string(),
            x: 10.0,
            y: 20.0,
            width: 120.0,
            height: 60.0,
            style: None,
            children: Vec::new(),
            parent_id: None,
        };
        let edge = ViewEdge {
            id: "e1".to_string(),
            relationship_id: "rel-a".to_string(),
            source_node_id: "n1".to_string(),
            target_node_id: "n2".to_string(),
            waypoints: vec![Point { x: 1.0, y: 2.0 }],
            style: None,
            label_position: None,
        };

        let node_json = serde_json::to_value(&node).expect("node should serialize");
        assert_eq!(node_json["elementId"], "elem-a");
        let edge_json = serde_json::to_value(&edge).expect("edge should serialize");
        assert_eq!(edge_json["relationshipId"], "rel-a");
        assert_eq!(edge_json["sourceNodeId"], "n1");
    }
}
