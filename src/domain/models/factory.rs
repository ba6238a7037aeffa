use serde::{Deserialize, Serialize};

use super::{Address, Entity, EntityKind};
use crate::domain::numeric::BigInt;

/// Singleton aggregate for a deployed talent factory contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factory {
    pub id: String,
    /// Number of talent tokens created through this factory
    pub talent_count: BigInt,
    pub owner: Address,
}

impl Factory {
    pub fn new(address: &Address) -> Self {
        Self {
            id: address.to_string(),
            talent_count: BigInt::ZERO,
            owner: Address::zero(),
        }
    }
}

impl Entity for Factory {
    const KIND: EntityKind = EntityKind::Factory;

    fn id(&self) -> &str {
        &self.id
    }
}
