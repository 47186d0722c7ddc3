//! Resumable position values.
//!
//! A position is a serializable reference, never a live pointer: the process
//! resuming a walk may not share memory with the one that produced the
//! context, and the referenced node may have been deleted in between.

use serde::{Deserialize, Serialize};

use crate::{errors::GraphMillError, store::GraphStore};

/// Durable reference to where a resumable computation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPosition {
    node_id: i64,
}

impl GraphPosition {
    pub fn new(node_id: i64) -> Self {
        Self { node_id }
    }

    pub fn node_id(&self) -> i64 {
        self.node_id
    }

    /// Re-resolve the referenced node. A position whose node no longer exists
    /// resolves to `None`, which callers treat identically to "no position".
    pub fn resolve(&self, store: &GraphStore) -> Result<Option<i64>, GraphMillError> {
        if store.node_exists(self.node_id)? {
            Ok(Some(self.node_id))
        } else {
            Ok(None)
        }
    }
}

/// Immutable snapshot produced by one step of a resumable module.
///
/// Ownership passes entirely to the caller, which persists it and hands it
/// back on the next step; the module never retains context across calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContext {
    position: Option<GraphPosition>,
}

impl ModuleContext {
    /// Sentinel for the very first invocation.
    pub fn empty() -> Self {
        Self { position: None }
    }

    pub fn at(node_id: i64) -> Self {
        Self {
            position: Some(GraphPosition::new(node_id)),
        }
    }

    pub fn position(&self) -> Option<GraphPosition> {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
    }
}
