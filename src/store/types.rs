use serde::{Deserialize, Serialize};

use crate::errors::GraphMillError;

/// Edge direction relative to a node, as seen by adjacency queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: i64,
    pub kind: String,
    pub name: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub edge_type: String,
    pub data: serde_json::Value,
}

impl GraphEdge {
    /// The endpoint on the far side of `node_id`. Self-loops return `node_id`.
    pub fn other_endpoint(&self, node_id: i64) -> i64 {
        if self.from_id == node_id {
            self.to_id
        } else {
            self.from_id
        }
    }
}

pub fn validate_node(node: &GraphNode) -> Result<(), GraphMillError> {
    if node.kind.trim().is_empty() {
        return Err(GraphMillError::invalid_input("node kind must be set"));
    }
    if node.name.trim().is_empty() {
        return Err(GraphMillError::invalid_input("node name must be set"));
    }
    Ok(())
}

pub fn validate_edge(edge: &GraphEdge) -> Result<(), GraphMillError> {
    if edge.edge_type.trim().is_empty() {
        return Err(GraphMillError::invalid_input("edge type must be set"));
    }
    if edge.from_id <= 0 || edge.to_id <= 0 {
        return Err(GraphMillError::invalid_input(
            "edge endpoints must be positive ids",
        ));
    }
    Ok(())
}

pub fn row_to_node(row: &rusqlite::Row<'_>) -> Result<GraphNode, rusqlite::Error> {
    let data: String = row.get(3)?;
    let value: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            data.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    Ok(GraphNode {
        id: row.get(0)?,
        kind: row.get(1)?,
        name: row.get(2)?,
        data: value,
    })
}

pub fn row_to_edge(row: &rusqlite::Row<'_>) -> Result<GraphEdge, rusqlite::Error> {
    let data: String = row.get(4)?;
    let value: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            data.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    Ok(GraphEdge {
        id: row.get(0)?,
        from_id: row.get(1)?,
        to_id: row.get(2)?,
        edge_type: row.get(3)?,
        data: value,
    })
}
