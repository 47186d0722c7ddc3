//! Edge CRUD and direction-aware adjacency for GraphStore.

use ahash::AHashSet;
use rusqlite::params;

use crate::errors::GraphMillError;

use super::{
    GraphStore,
    types::{Direction, GraphEdge, row_to_edge, validate_edge},
};

impl GraphStore {
    pub fn insert_edge(&self, edge: &GraphEdge) -> Result<i64, GraphMillError> {
        validate_edge(edge)?;
        if !self.node_exists(edge.from_id)? || !self.node_exists(edge.to_id)? {
            return Err(GraphMillError::invalid_input(
                "edge endpoints must reference existing nodes",
            ));
        }
        let data = serde_json::to_string(&edge.data)
            .map_err(|e| GraphMillError::invalid_input(e.to_string()))?;
        self.connection()
            .execute(
                "INSERT INTO graph_edges(from_id, to_id, edge_type, data) VALUES(?1, ?2, ?3, ?4)",
                params![edge.from_id, edge.to_id, edge.edge_type.as_str(), data],
            )
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        self.invalidate_caches();
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_edge(&self, id: i64) -> Result<GraphEdge, GraphMillError> {
        self.connection()
            .query_row(
                "SELECT id, from_id, to_id, edge_type, data FROM graph_edges WHERE id=?1",
                params![id],
                row_to_edge,
            )
            .map_err(|err| match err {
                rusqlite::Error::QueryReturnedNoRows => {
                    GraphMillError::not_found(format!("edge {id}"))
                }
                other => GraphMillError::query(other.to_string()),
            })
    }

    /// Edges incident to `id` in the given direction, in deterministic order.
    pub fn edges_of(&self, id: i64, direction: Direction) -> Result<Vec<GraphEdge>, GraphMillError> {
        match direction {
            Direction::Outgoing => self.fetch_outgoing(id),
            Direction::Incoming => self.fetch_incoming(id),
            Direction::Both => {
                let mut edges = self.fetch_outgoing(id)?;
                let mut seen: AHashSet<i64> = edges.iter().map(|e| e.id).collect();
                for edge in self.fetch_incoming(id)? {
                    if seen.insert(edge.id) {
                        edges.push(edge);
                    }
                }
                edges.sort_by_key(|e| e.id);
                Ok(edges)
            }
        }
    }

    pub(crate) fn fetch_outgoing(&self, id: i64) -> Result<Vec<GraphEdge>, GraphMillError> {
        if let Some(cached) = self.outgoing_cache.get(id) {
            return Ok(cached);
        }
        let result = self.collect_edges(
            "SELECT id, from_id, to_id, edge_type, data FROM graph_edges \
             WHERE from_id=?1 ORDER BY to_id, edge_type, id",
            id,
        )?;
        self.outgoing_cache.insert(id, result.clone());
        Ok(result)
    }

    pub(crate) fn fetch_incoming(&self, id: i64) -> Result<Vec<GraphEdge>, GraphMillError> {
        if let Some(cached) = self.incoming_cache.get(id) {
            return Ok(cached);
        }
        let result = self.collect_edges(
            "SELECT id, from_id, to_id, edge_type, data FROM graph_edges \
             WHERE to_id=?1 ORDER BY from_id, edge_type, id",
            id,
        )?;
        self.incoming_cache.insert(id, result.clone());
        Ok(result)
    }

    fn collect_edges(&self, sql: &str, id: i64) -> Result<Vec<GraphEdge>, GraphMillError> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached(sql)
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        let rows = stmt
            .query_map(params![id], row_to_edge)
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        let mut result = Vec::new();
        for item in rows {
            result.push(item.map_err(|e| GraphMillError::query(e.to_string()))?);
        }
        Ok(result)
    }
}
