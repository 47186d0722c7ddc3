//! Pluggable selection strategies for the random walker.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    errors::GraphMillError,
    store::{Direction, GraphEdge, GraphStore},
};

/// Picks a node to (re)start the walk from.
pub trait NodeSelector {
    /// `None` iff the store holds no nodes at all.
    fn select_node(&mut self, store: &GraphStore) -> Result<Option<i64>, GraphMillError>;
}

/// Picks the next edge to follow from the current node.
pub trait EdgeChooser {
    /// `None` iff the node has no eligible edges.
    fn choose_edge(
        &mut self,
        store: &GraphStore,
        node_id: i64,
    ) -> Result<Option<GraphEdge>, GraphMillError>;
}

/// Uniform "hyper-jump" node selection, decoupled from any locality bias so
/// the walk cannot stay trapped in a disconnected component.
pub struct HyperJumpSelector {
    rng: StdRng,
}

impl HyperJumpSelector {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for HyperJumpSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeSelector for HyperJumpSelector {
    fn select_node(&mut self, store: &GraphStore) -> Result<Option<i64>, GraphMillError> {
        let ids = store.all_node_ids()?;
        if ids.is_empty() {
            return Ok(None);
        }
        Ok(Some(ids[self.rng.gen_range(0..ids.len())]))
    }
}

/// Uniform choice among the current node's edges in the configured direction,
/// optionally restricted to a single edge type.
pub struct RandomEdgeChooser {
    direction: Direction,
    edge_type: Option<String>,
    rng: StdRng,
}

impl RandomEdgeChooser {
    pub fn new(direction: Direction, edge_type: Option<String>) -> Self {
        Self {
            direction,
            edge_type,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(direction: Direction, edge_type: Option<String>, seed: u64) -> Self {
        Self {
            direction,
            edge_type,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EdgeChooser for RandomEdgeChooser {
    fn choose_edge(
        &mut self,
        store: &GraphStore,
        node_id: i64,
    ) -> Result<Option<GraphEdge>, GraphMillError> {
        let mut edges = store.edges_of(node_id, self.direction)?;
        if let Some(wanted) = &self.edge_type {
            edges.retain(|e| &e.edge_type == wanted);
        }
        if edges.is_empty() {
            return Ok(None);
        }
        let index = self.rng.gen_range(0..edges.len());
        Ok(Some(edges.swap_remove(index)))
    }
}
