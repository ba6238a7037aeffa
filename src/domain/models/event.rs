//! Decoded contract events as delivered by the indexing host

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Address;
use crate::domain::numeric::{deserialize_uint256, BigInt};

/// Position of an event in the chain: block height, then index within the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCursor {
    pub block_number: u64,
    pub log_index: u64,
}

impl fmt::Display for EventCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block_number, self.log_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    TalentCreated,
    Transfer,
    Stake,
    Unstake,
    RewardClaim,
    StakeOwnershipChange,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::TalentCreated => "TalentCreated",
            EventKind::Transfer => "Transfer",
            EventKind::Stake => "Stake",
            EventKind::Unstake => "Unstake",
            EventKind::RewardClaim => "RewardClaim",
            EventKind::StakeOwnershipChange => "StakeOwnershipChange",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentCreatedEvent {
    pub token: Address,
    pub talent: Address,
    pub block_timestamp: u64,
}

/// Sender, receiver and value are not needed to refresh the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub token_address: Address,
    pub block_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeEvent {
    pub talent_token: Address,
    pub owner: Address,
    #[serde(deserialize_with = "deserialize_uint256")]
    pub tal_amount: BigInt,
    pub block_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstakeEvent {
    pub talent_token: Address,
    pub owner: Address,
    #[serde(deserialize_with = "deserialize_uint256")]
    pub tal_amount: BigInt,
    pub block_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardClaimEvent {
    pub talent_token: Address,
    pub owner: Address,
    #[serde(deserialize_with = "deserialize_uint256")]
    pub staker_reward: BigInt,
    #[serde(deserialize_with = "deserialize_uint256")]
    pub talent_reward: BigInt,
    pub block_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeOwnershipChangeEvent {
    pub talent: Address,
    pub owner: Address,
    pub new_owner: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProtocolEvent {
    TalentCreated(TalentCreatedEvent),
    Transfer(TransferEvent),
    Stake(StakeEvent),
    Unstake(UnstakeEvent),
    RewardClaim(RewardClaimEvent),
    StakeOwnershipChange(StakeOwnershipChangeEvent),
}

impl ProtocolEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ProtocolEvent::TalentCreated(_) => EventKind::TalentCreated,
            ProtocolEvent::Transfer(_) => EventKind::Transfer,
            ProtocolEvent::Stake(_) => EventKind::Stake,
            ProtocolEvent::Unstake(_) => EventKind::Unstake,
            ProtocolEvent::RewardClaim(_) => EventKind::RewardClaim,
            ProtocolEvent::StakeOwnershipChange(_) => EventKind::StakeOwnershipChange,
        }
    }
}

/// One event together with its position in the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub block_number: u64,
    pub log_index: u64,
    #[serde(flatten)]
    pub event: ProtocolEvent,
}

impl EventEnvelope {
    pub fn new(block_number: u64, log_index: u64, event: ProtocolEvent) -> Self {
        Self {
            block_number,
            log_index,
            event,
        }
    }

    pub fn cursor(&self) -> EventCursor {
        EventCursor {
            block_number: self.block_number,
            log_index: self.log_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_stake_envelope() {
        let line = json!({
            "blockNumber": 12,
            "logIndex": 3,
            "type": "Stake",
            "talentToken": "0x1111111111111111111111111111111111111111",
            "owner": "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
            "talAmount": "500000000000000000000",
            "blockTimestamp": 200
        });

        let envelope: EventEnvelope = serde_json::from_value(line).unwrap();
        assert_eq!(envelope.cursor(), EventCursor { block_number: 12, log_index: 3 });
        assert_eq!(envelope.event.kind(), EventKind::Stake);

        match envelope.event {
            ProtocolEvent::Stake(stake) => {
                assert_eq!(stake.owner.to_string(), "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
                assert_eq!(stake.tal_amount.to_string(), "500000000000000000000");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_payload() {
        let line = json!({
            "blockNumber": 1,
            "logIndex": 0,
            "type": "Unstake",
            "talentToken": "not-an-address",
            "owner": "0x1111111111111111111111111111111111111111",
            "talAmount": "1",
            "blockTimestamp": 1
        });
        assert!(serde_json::from_value::<EventEnvelope>(line).is_err());
    }

    #[test]
    fn test_amounts_must_be_uint256() {
        let stake_with = |amount: &str| {
            json!({
                "blockNumber": 1,
                "logIndex": 0,
                "type": "Stake",
                "talentToken": "0x1111111111111111111111111111111111111111",
                "owner": "0x2222222222222222222222222222222222222222",
                "talAmount": amount,
                "blockTimestamp": 1
            })
        };

        assert!(serde_json::from_value::<EventEnvelope>(stake_with("-5")).is_err());
        assert!(serde_json::from_value::<EventEnvelope>(stake_with("2.5")).is_err());

        let above_96_bits = "100000000000000000000000000000";
        let envelope: EventEnvelope = serde_json::from_value(stake_with(above_96_bits)).unwrap();
        match envelope.event {
            ProtocolEvent::Stake(stake) => assert_eq!(stake.tal_amount.to_string(), above_96_bits),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_cursor_ordering() {
        let a = EventCursor { block_number: 5, log_index: 9 };
        let b = EventCursor { block_number: 6, log_index: 0 };
        let c = EventCursor { block_number: 6, log_index: 1 };
        assert!(a < b && b < c);
    }
}
