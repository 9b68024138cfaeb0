//! Diagram node type consumed by the analysis pipeline
//!
//! A [`DiagramNode`] is a flat record for one graph cell: either a vertex
//! (class container, member line, separator) or an edge between two vertices.

use serde::Serialize;

use super::CellStyle;

/// One cell of the input graph, exactly as the loader read it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagramNode {
    /// Unique identifier of the cell
    pub id: String,
    /// Identifier of the owning cell (empty for root-level cells)
    pub parent: String,
    /// Label text, possibly containing inline HTML markup
    pub value: String,
    /// Raw presentation style string (`key=value;flag;...`)
    pub style: String,
    /// Set when the cell is drawn as a vertex
    pub vertex: bool,
    /// Set when the cell is drawn as an edge
    pub edge: bool,
    /// Edge source cell id (meaningful only for edges)
    pub source: String,
    /// Edge target cell id (meaningful only for edges)
    pub target: String,
}

impl DiagramNode {
    /// Create a vertex node
    pub fn vertex(
        id: impl Into<String>,
        parent: impl Into<String>,
        value: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            value: value.into(),
            style: style.into(),
            vertex: true,
            ..Self::default()
        }
    }

    /// Create an edge node between two cells
    pub fn edge(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent: "1".to_string(),
            style: style.into(),
            edge: true,
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    /// Parse the style string of this node
    pub fn cell_style(&self) -> CellStyle {
        CellStyle::parse(&self.style)
    }

    /// Returns true if this is an edge with both endpoints set
    pub fn is_connected_edge(&self) -> bool {
        self.edge && !self.source.is_empty() && !self.target.is_empty()
    }
}
