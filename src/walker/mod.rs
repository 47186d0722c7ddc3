//! Resumable random-walk traversal.
//!
//! One invocation performs one step of a random walk over the store and
//! returns a new [`ModuleContext`] for the caller to persist. Positions are
//! serializable values re-resolved against the store on every step, so a walk
//! survives process restarts and node deletions.

mod module;
mod position;
mod selectors;

pub use module::{PAGE_RANK_PROPERTY_KEY, RandomWalkerModule};
pub use position::{GraphPosition, ModuleContext};
pub use selectors::{EdgeChooser, HyperJumpSelector, NodeSelector, RandomEdgeChooser};
