//! Node CRUD operations for GraphStore.

use rusqlite::{OptionalExtension, params};

use crate::errors::GraphMillError;

use super::{
    GraphStore,
    types::{GraphNode, row_to_node, validate_node},
};

impl GraphStore {
    pub fn insert_node(&self, node: &GraphNode) -> Result<i64, GraphMillError> {
        validate_node(node)?;
        let data = serde_json::to_string(&node.data)
            .map_err(|e| GraphMillError::invalid_input(e.to_string()))?;
        self.connection()
            .execute(
                "INSERT INTO graph_nodes(kind, name, data) VALUES(?1, ?2, ?3)",
                params![node.kind.as_str(), node.name.as_str(), data],
            )
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_node(&self, id: i64) -> Result<GraphNode, GraphMillError> {
        self.connection()
            .query_row(
                "SELECT id, kind, name, data FROM graph_nodes WHERE id=?1",
                params![id],
                row_to_node,
            )
            .map_err(|err| match err {
                rusqlite::Error::QueryReturnedNoRows => {
                    GraphMillError::not_found(format!("node {id}"))
                }
                other => GraphMillError::query(other.to_string()),
            })
    }

    pub fn node_exists(&self, id: i64) -> Result<bool, GraphMillError> {
        let exists: Option<i64> = self
            .connection()
            .query_row(
                "SELECT 1 FROM graph_nodes WHERE id=?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        Ok(exists.is_some())
    }

    pub fn delete_node(&self, id: i64) -> Result<(), GraphMillError> {
        let affected = self
            .connection()
            .execute("DELETE FROM graph_nodes WHERE id=?1", params![id])
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        if affected == 0 {
            return Err(GraphMillError::not_found(format!("node {id}")));
        }
        self.connection()
            .execute(
                "DELETE FROM graph_edges WHERE from_id=?1 OR to_id=?1",
                params![id],
            )
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        self.connection()
            .execute("DELETE FROM graph_properties WHERE node_id=?1", params![id])
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        self.invalidate_caches();
        Ok(())
    }

    pub fn node_count(&self) -> Result<i64, GraphMillError> {
        self.connection()
            .query_row("SELECT COUNT(1) FROM graph_nodes", [], |row| row.get(0))
            .map_err(|e| GraphMillError::query(e.to_string()))
    }

    pub fn all_node_ids(&self) -> Result<Vec<i64>, GraphMillError> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached("SELECT id FROM graph_nodes ORDER BY id")
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        let mut ids = Vec::new();
        for id in rows {
            ids.push(id.map_err(|e| GraphMillError::query(e.to_string()))?);
        }
        Ok(ids)
    }
}
