use serde::{Deserialize, Serialize};

use super::{Address, Entity, EntityKind};
use crate::domain::numeric::{BigDecimal, BigInt, NumericError};
use crate::domain::protocol::ProtocolConfig;

/// Aggregate for a single talent token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Token contract address
    pub id: String,
    /// Talent (creator) address
    pub owner: Address,
    /// Distinct supporters; may drift below zero, see the unstake reducer
    pub supporter_count: BigInt,
    pub tx_count: BigInt,
    /// Staked TAL plus the initial supply baseline
    pub total_value_locked: BigInt,
    /// Absent in generations that do not track market cap
    pub market_cap: Option<BigDecimal>,
    pub rewards_ready: Option<BigDecimal>,
    pub rewards_claimed: Option<BigDecimal>,
    pub created_at_timestamp: u64,

    // Mirrored from the token contract on Transfer
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub name: Option<String>,
    pub max_supply: Option<BigInt>,
    pub total_supply: Option<BigInt>,
}

impl Token {
    /// Creates a token holding only the protocol's initial supply
    pub fn new(
        address: &Address,
        owner: Address,
        protocol: &ProtocolConfig,
        timestamp: u64,
    ) -> Result<Self, NumericError> {
        let market_cap = match protocol.market_cap {
            Some(rule) => Some(rule.apply(&protocol.initial_supply)?),
            None => None,
        };

        Ok(Self {
            id: address.to_string(),
            owner,
            supporter_count: BigInt::ZERO,
            tx_count: BigInt::ZERO,
            total_value_locked: protocol.initial_supply.clone(),
            market_cap,
            rewards_ready: protocol.reward_accumulator(),
            rewards_claimed: protocol.reward_accumulator(),
            created_at_timestamp: timestamp,
            symbol: None,
            decimals: None,
            name: None,
            max_supply: None,
            total_supply: None,
        })
    }
}

impl Entity for Token {
    const KIND: EntityKind = EntityKind::Token;

    fn id(&self) -> &str {
        &self.id
    }
}
