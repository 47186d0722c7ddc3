//! Embedded SQLite-backed graph store.
//!
//! The store is the single shared mutable resource of the crate: every
//! mutation performed by the transaction executors and the walker module goes
//! through a [`GraphStore`] handle, passed explicitly to each operation.

mod edge_ops;
mod node_ops;
mod props;
mod sqlite_store;
mod types;

pub use sqlite_store::GraphStore;
pub use types::{Direction, GraphEdge, GraphNode};
