//! Protocol versions of the talent token contracts
//!
//! Each deployed generation of the factory/staking contracts changed the
//! accounting rules slightly. Rather than keeping one reducer set per
//! generation, the reducers read the differences from [`ProtocolConfig`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::models::{Address, EventKind};
use crate::domain::numeric::{BigDecimal, BigInt, NumericError};

/// Divisor between staked TAL and the talent token market cap
pub const MARKET_CAP_DIVISOR: u64 = 5;

/// Initial supply minted for each talent token (10,000 tokens with 18 decimals)
pub const INITIAL_SUPPLY_TOKENS: u64 = 10_000;
pub const TOKEN_DECIMALS: u32 = 18;

/// Deployed protocol generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVersion {
    V1,
    V2,
    V3,
    V4,
    V5,
}

impl ProtocolVersion {
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(ProtocolVersion::V1),
            2 => Some(ProtocolVersion::V2),
            3 => Some(ProtocolVersion::V3),
            4 => Some(ProtocolVersion::V4),
            5 => Some(ProtocolVersion::V5),
            _ => None,
        }
    }

    pub fn latest() -> Self {
        ProtocolVersion::V5
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = match self {
            ProtocolVersion::V1 => 1,
            ProtocolVersion::V2 => 2,
            ProtocolVersion::V3 => 3,
            ProtocolVersion::V4 => 4,
            ProtocolVersion::V5 => 5,
        };
        write!(f, "v{}", number)
    }
}

/// How a staked amount is turned into a market cap delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketCapRule {
    /// Integer floor division, remainder dropped
    FloorInteger,
    /// Exact decimal division
    ExactDecimal,
}

impl MarketCapRule {
    pub fn apply(&self, amount: &BigInt) -> Result<BigDecimal, NumericError> {
        match self {
            MarketCapRule::FloorInteger => Ok(amount.floor_div(MARKET_CAP_DIVISOR)?.to_decimal()),
            MarketCapRule::ExactDecimal => amount.to_decimal().div_int(MARKET_CAP_DIVISOR),
        }
    }
}

/// Accounting rules for one protocol generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub version: ProtocolVersion,
    /// Address of the talent factory contract, also the Factory entity id
    pub factory_address: Address,
    /// Value locked in a freshly created token before any stake
    pub initial_supply: BigInt,
    /// `None` when the generation does not track market cap
    pub market_cap: Option<MarketCapRule>,
    /// Whether tokens and supporters carry reward accumulators
    pub tracks_rewards: bool,
    pub tracks_day_data: bool,
    pub supports_stake_transfer: bool,
    pub supports_reward_claim: bool,
    /// Whether a missing token on Stake is backfilled through a talent lookup
    pub lazy_owner_backfill: bool,
}

impl ProtocolConfig {
    pub fn for_version(version: ProtocolVersion, factory_address: Address) -> Self {
        let standard_supply = BigInt::pow10(INITIAL_SUPPLY_TOKENS, TOKEN_DECIMALS);

        match version {
            ProtocolVersion::V1 => ProtocolConfig {
                version,
                factory_address,
                initial_supply: BigInt::ZERO,
                market_cap: None,
                tracks_rewards: false,
                tracks_day_data: false,
                supports_stake_transfer: false,
                supports_reward_claim: false,
                lazy_owner_backfill: false,
            },
            ProtocolVersion::V2 => ProtocolConfig {
                version,
                factory_address,
                initial_supply: standard_supply.clone(),
                market_cap: Some(MarketCapRule::FloorInteger),
                tracks_rewards: false,
                tracks_day_data: false,
                supports_stake_transfer: false,
                supports_reward_claim: false,
                lazy_owner_backfill: false,
            },
            ProtocolVersion::V3 => ProtocolConfig {
                version,
                factory_address,
                initial_supply: standard_supply.clone(),
                market_cap: Some(MarketCapRule::ExactDecimal),
                tracks_rewards: false,
                tracks_day_data: true,
                supports_stake_transfer: true,
                supports_reward_claim: false,
                lazy_owner_backfill: false,
            },
            ProtocolVersion::V4 => ProtocolConfig {
                version,
                factory_address,
                initial_supply: standard_supply.clone(),
                market_cap: Some(MarketCapRule::FloorInteger),
                tracks_rewards: true,
                tracks_day_data: true,
                supports_stake_transfer: true,
                supports_reward_claim: true,
                lazy_owner_backfill: false,
            },
            ProtocolVersion::V5 => ProtocolConfig {
                version,
                factory_address,
                initial_supply: standard_supply,
                market_cap: Some(MarketCapRule::FloorInteger),
                tracks_rewards: true,
                tracks_day_data: true,
                supports_stake_transfer: true,
                supports_reward_claim: true,
                lazy_owner_backfill: true,
            },
        }
    }

    /// Whether events of this kind are emitted by this generation's contracts
    pub fn supports(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::TalentCreated | EventKind::Transfer | EventKind::Stake | EventKind::Unstake => {
                true
            }
            EventKind::RewardClaim => self.supports_reward_claim,
            EventKind::StakeOwnershipChange => self.supports_stake_transfer,
        }
    }

    /// Zero accumulator when rewards are tracked, absent otherwise
    pub fn reward_accumulator(&self) -> Option<BigDecimal> {
        self.tracks_rewards.then(BigDecimal::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(version: ProtocolVersion) -> ProtocolConfig {
        ProtocolConfig::for_version(version, Address::zero())
    }

    #[test]
    fn test_initial_supply_per_version() {
        assert_eq!(config(ProtocolVersion::V1).initial_supply, BigInt::ZERO);
        assert_eq!(
            config(ProtocolVersion::V5).initial_supply.to_string(),
            "10000000000000000000000"
        );
    }

    #[test]
    fn test_event_support_matrix() {
        let v2 = config(ProtocolVersion::V2);
        assert!(v2.supports(EventKind::Stake));
        assert!(!v2.supports(EventKind::RewardClaim));
        assert!(!v2.supports(EventKind::StakeOwnershipChange));

        let v3 = config(ProtocolVersion::V3);
        assert!(v3.supports(EventKind::StakeOwnershipChange));
        assert!(!v3.supports(EventKind::RewardClaim));

        assert!(config(ProtocolVersion::V4).supports(EventKind::RewardClaim));
    }

    #[test]
    fn test_only_latest_backfills_owner() {
        assert!(config(ProtocolVersion::V5).lazy_owner_backfill);
        assert!(!config(ProtocolVersion::V4).lazy_owner_backfill);
    }

    #[test]
    fn test_market_cap_rules() {
        let amount: BigInt = "12".parse().unwrap();
        assert_eq!(MarketCapRule::FloorInteger.apply(&amount).unwrap().to_string(), "2");
        assert_eq!(MarketCapRule::ExactDecimal.apply(&amount).unwrap().to_string(), "2.4");
        assert_eq!(config(ProtocolVersion::V1).market_cap, None);
        assert_eq!(
            config(ProtocolVersion::V3).market_cap,
            Some(MarketCapRule::ExactDecimal)
        );
    }

    #[test]
    fn test_version_numbers() {
        assert_eq!(ProtocolVersion::from_number(3), Some(ProtocolVersion::V3));
        assert_eq!(ProtocolVersion::from_number(9), None);
        assert_eq!(ProtocolVersion::latest().to_string(), "v5");
    }
}
