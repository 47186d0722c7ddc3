//! Node property storage.
//!
//! Properties are JSON values keyed by `(node_id, key)`. An absent property
//! reads back as `None`, never as an error; the walker's visitation counter
//! relies on that absent-defaults-to-zero behaviour.

use rusqlite::{OptionalExtension, params};

use crate::errors::GraphMillError;

use super::GraphStore;

impl GraphStore {
    pub fn node_property(
        &self,
        node_id: i64,
        key: &str,
    ) -> Result<Option<serde_json::Value>, GraphMillError> {
        let raw: Option<String> = self
            .connection()
            .query_row(
                "SELECT value FROM graph_properties WHERE node_id=?1 AND key=?2",
                params![node_id, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        match raw {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| GraphMillError::query(e.to_string())),
            None => Ok(None),
        }
    }

    pub fn node_property_i64(
        &self,
        node_id: i64,
        key: &str,
    ) -> Result<Option<i64>, GraphMillError> {
        Ok(self.node_property(node_id, key)?.and_then(|v| v.as_i64()))
    }

    pub fn set_node_property(
        &self,
        node_id: i64,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), GraphMillError> {
        if key.trim().is_empty() {
            return Err(GraphMillError::invalid_input("property key must be set"));
        }
        if !self.node_exists(node_id)? {
            return Err(GraphMillError::not_found(format!("node {node_id}")));
        }
        let payload =
            serde_json::to_string(value).map_err(|e| GraphMillError::invalid_input(e.to_string()))?;
        self.connection()
            .execute(
                "INSERT INTO graph_properties(node_id, key, value) VALUES(?1, ?2, ?3) \
                 ON CONFLICT(node_id, key) DO UPDATE SET value=excluded.value",
                params![node_id, key, payload],
            )
            .map_err(|e| GraphMillError::query(e.to_string()))?;
        Ok(())
    }
}
