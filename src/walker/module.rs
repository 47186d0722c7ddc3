//! Resumable random-walk module.

use serde_json::json;

use crate::{
    config::WalkerConfig,
    errors::GraphMillError,
    module::TimerDrivenModule,
    store::GraphStore,
    walker::{
        position::ModuleContext,
        selectors::{EdgeChooser, HyperJumpSelector, NodeSelector, RandomEdgeChooser},
    },
};

/// Property key of the per-node visitation counter maintained by the walker.
pub const PAGE_RANK_PROPERTY_KEY: &str = "pageRankValue";

/// Performs one step of a random walk per invocation, resuming from the
/// position carried in the previous [`ModuleContext`].
///
/// Each step visits exactly one node and increments its visitation counter by
/// one, whether the node was reached over an edge or through a restart. Over
/// many steps the counters approximate PageRank by visitation count: the walk
/// follows a uniformly chosen eligible edge and teleports (reselects a node
/// uniformly) whenever the current node has none, mirroring the classic
/// random-surfer restart.
pub struct RandomWalkerModule {
    config: WalkerConfig,
    selector: Box<dyn NodeSelector>,
    chooser: Box<dyn EdgeChooser>,
}

impl RandomWalkerModule {
    /// Module with the default strategies: hyper-jump node selection and
    /// uniform edge choice honoring the configured direction and type filter.
    pub fn new(config: WalkerConfig) -> Self {
        let chooser = RandomEdgeChooser::new(config.direction, config.edge_type.clone());
        Self {
            selector: Box::new(HyperJumpSelector::new()),
            chooser: Box::new(chooser),
            config,
        }
    }

    /// Module with caller-supplied selection strategies.
    pub fn with_strategies(
        config: WalkerConfig,
        selector: Box<dyn NodeSelector>,
        chooser: Box<dyn EdgeChooser>,
    ) -> Self {
        Self {
            config,
            selector,
            chooser,
        }
    }

    fn bump_counter(&self, store: &GraphStore, node_id: i64) -> Result<i64, GraphMillError> {
        let key = self.config.property_key.as_str();
        let current = store.node_property_i64(node_id, key)?.unwrap_or(0);
        let next = current + 1;
        store.set_node_property(node_id, key, &json!(next))?;
        Ok(next)
    }
}

impl TimerDrivenModule for RandomWalkerModule {
    type Config = WalkerConfig;

    fn id(&self) -> &str {
        &self.config.id
    }

    fn configuration(&self) -> &WalkerConfig {
        &self.config
    }

    fn do_some_work(
        &mut self,
        last_context: &ModuleContext,
        store: &GraphStore,
    ) -> Result<ModuleContext, GraphMillError> {
        // Resolve the previous position; a missing or stale one reseeds.
        let resolved = match last_context.position() {
            Some(position) => position.resolve(store)?,
            None => None,
        };
        let current = match resolved {
            Some(id) => id,
            None => match self.selector.select_node(store)? {
                Some(id) => id,
                // Nothing to walk over; leave the store untouched.
                None => return Ok(ModuleContext::empty()),
            },
        };

        let next = match self.chooser.choose_edge(store, current)? {
            Some(edge) => edge.other_endpoint(current),
            // Teleportation step: no eligible edge, jump somewhere uniform.
            None => self
                .selector
                .select_node(store)?
                .ok_or_else(|| GraphMillError::module("node vanished mid-step"))?,
        };

        let value = self.bump_counter(store, next)?;
        tracing::trace!(module = %self.config.id, node = next, counter = value, "walk step");
        Ok(ModuleContext::at(next))
    }
}
