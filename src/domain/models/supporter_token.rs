use serde::{Deserialize, Serialize};

use super::{Address, Entity, EntityKind};
use crate::domain::numeric::BigDecimal;

/// Running stake of one supporter in one talent token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupporterToken {
    /// `{supporter}-{token}`
    pub id: String,
    pub supporter: Address,
    pub talent: Address,
    /// Talent tokens represented by the stake (`tal_amount / 5`)
    pub amount: BigDecimal,
    pub tal_amount: BigDecimal,
    pub first_time_bought_at: u64,
    pub last_time_bought_at: u64,
}

impl SupporterToken {
    pub fn key(supporter: &Address, token: &Address) -> String {
        format!("{}-{}", supporter, token)
    }

    pub fn new(supporter: &Address, token: &Address, timestamp: u64) -> Self {
        Self {
            id: Self::key(supporter, token),
            supporter: *supporter,
            talent: *token,
            amount: BigDecimal::zero(),
            tal_amount: BigDecimal::zero(),
            first_time_bought_at: timestamp,
            last_time_bought_at: timestamp,
        }
    }

    /// Same relationship under a different supporter key
    pub fn rekeyed(&self, supporter: &Address) -> Self {
        Self {
            id: Self::key(supporter, &self.talent),
            supporter: *supporter,
            ..self.clone()
        }
    }
}

impl Entity for SupporterToken {
    const KIND: EntityKind = EntityKind::SupporterToken;

    fn id(&self) -> &str {
        &self.id
    }
}
