//! Module configuration value objects.

use serde::{Deserialize, Serialize};

use crate::store::Direction;
use crate::walker::PAGE_RANK_PROPERTY_KEY;

/// Immutable configuration for a [`crate::walker::RandomWalkerModule`].
///
/// `id` is the module's stable identity towards the hosting runtime;
/// `direction` and `edge_type` restrict which edges the walk may follow;
/// `property_key` names the per-node visitation counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    pub id: String,
    pub direction: Direction,
    pub edge_type: Option<String>,
    pub property_key: String,
}

impl WalkerConfig {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_edge_type<T: Into<String>>(mut self, edge_type: T) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn with_property_key<T: Into<String>>(mut self, key: T) -> Self {
        self.property_key = key.into();
        self
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            id: "random-walker".to_string(),
            direction: Direction::Outgoing,
            edge_type: None,
            property_key: PAGE_RANK_PROPERTY_KEY.to_string(),
        }
    }
}
