use serde::{Deserialize, Serialize};

use super::{Address, Entity, EntityKind};
use crate::domain::numeric::BigInt;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Total supply snapshot of a token for one UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDayData {
    /// `{token}-{day_index}`
    pub id: String,
    pub talent: Address,
    /// Start of the day, in seconds since the epoch
    pub date: u64,
    pub daily_supply: BigInt,
}

impl TokenDayData {
    pub fn day_index(timestamp: u64) -> u64 {
        timestamp / SECONDS_PER_DAY
    }

    pub fn key(token: &Address, day_index: u64) -> String {
        format!("{}-{}", token, day_index)
    }
}

impl Entity for TokenDayData {
    const KIND: EntityKind = EntityKind::TokenDayData;

    fn id(&self) -> &str {
        &self.id
    }
}
