//! Transactional batch execution and resumable graph traversal over an
//! embedded SQLite graph store.
//!
//! graphmill provides two cooperating subsystems on top of a lightweight
//! SQLite-backed graph store:
//!
//! - **Transaction executors**: [`TransactionRunner`] runs one callback inside
//!   one transaction boundary (commit on success, rollback on failure, always
//!   finalized); [`BatchExecutor`] drives a bounded or synthesized stream of
//!   work items through it in fixed-size, independently committed batches,
//!   isolating failures to the batch they occur in.
//! - **Random walker**: [`RandomWalkerModule`] performs one step of a
//!   resumable random walk per invocation, persisting its position between
//!   calls through [`ModuleContext`] and incrementing a per-node visitation
//!   counter, a PageRank-by-visitation-count approximation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use graphmill::{BatchExecutor, GraphNode, GraphStore, NullItem};
//!
//! # fn main() -> Result<(), graphmill::GraphMillError> {
//! let store = GraphStore::open_in_memory()?;
//!
//! // Create 100 nodes, committed in batches of 10.
//! let mut executor = BatchExecutor::with_steps(
//!     &store,
//!     10,
//!     100,
//!     |store: &GraphStore, _: NullItem| {
//!         store.insert_node(&GraphNode {
//!             id: 0,
//!             kind: "Person".into(),
//!             name: "anon".into(),
//!             data: serde_json::json!({}),
//!         })?;
//!         Ok(())
//!     },
//! )?;
//! executor.execute()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure containment
//!
//! An item failure rolls back its whole batch, never the run: prior batches
//! stay committed and the configured [`FailurePolicy`] decides whether the
//! run continues. Commit/rollback failures are always fatal.

// Core public modules
pub mod cache;
pub mod config;
pub mod errors;
pub mod fault_injection;
pub mod module;
pub mod schema;
pub mod store;
pub mod tx;
pub mod walker;

// Re-export the stable public API
pub use cache::CacheStats;
pub use config::WalkerConfig;
pub use errors::GraphMillError;
pub use module::TimerDrivenModule;
pub use schema::MigrationReport;
pub use store::{Direction, GraphEdge, GraphNode, GraphStore};
pub use tx::{
    BatchExecutor, BatchOutcome, BatchReport, CollectFailures, FailurePolicy, LogAndContinue,
    NullItem, Rethrow, TransactionRunner, UnitOfWork,
};
pub use walker::{
    EdgeChooser, GraphPosition, HyperJumpSelector, ModuleContext, NodeSelector,
    PAGE_RANK_PROPERTY_KEY, RandomEdgeChooser, RandomWalkerModule,
};
