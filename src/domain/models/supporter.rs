use serde::{Deserialize, Serialize};

use super::{Address, Entity, EntityKind};
use crate::domain::numeric::BigDecimal;
use crate::domain::protocol::ProtocolConfig;

/// Address that has staked against one or more talent tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supporter {
    pub id: String,
    /// TAL currently staked across all tokens
    pub total_amount: BigDecimal,
    pub rewards_claimed: Option<BigDecimal>,
}

impl Supporter {
    pub fn new(address: &Address, protocol: &ProtocolConfig) -> Self {
        Self {
            id: address.to_string(),
            total_amount: BigDecimal::zero(),
            rewards_claimed: protocol.reward_accumulator(),
        }
    }
}

impl Entity for Supporter {
    const KIND: EntityKind = EntityKind::Supporter;

    fn id(&self) -> &str {
        &self.id
    }
}
