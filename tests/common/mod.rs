#![allow(dead_code)]

use std::str::FromStr;

use talent_indexer::application::indexer::Indexer;
use talent_indexer::domain::models::{
    Address, EventEnvelope, ProtocolEvent, RewardClaimEvent, StakeEvent,
    StakeOwnershipChangeEvent, TalentCreatedEvent, TransferEvent, UnstakeEvent,
};
use talent_indexer::domain::numeric::BigInt;
use talent_indexer::domain::protocol::{ProtocolConfig, ProtocolVersion};
use talent_indexer::infrastructure::ethereum::{StaticContractReader, TokenMetadata};
use talent_indexer::infrastructure::persistence::MemoryStore;

pub type TestIndexer = Indexer<MemoryStore, StaticContractReader>;

pub const FACTORY: &str = "0x5555555555555555555555555555555555555555";
pub const TOKEN_T: &str = "0x1111111111111111111111111111111111111111";
pub const TOKEN_U: &str = "0x2222222222222222222222222222222222222222";
pub const TALENT_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const SUPPORTER_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub const SUPPORTER_C: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

pub fn addr(value: &str) -> Address {
    Address::from_str(value).unwrap()
}

/// `tokens * 10^18`
pub fn e18(tokens: u64) -> BigInt {
    BigInt::pow10(tokens, 18)
}

pub fn int(value: &str) -> BigInt {
    BigInt::from_str(value).unwrap()
}

pub fn protocol(version: ProtocolVersion) -> ProtocolConfig {
    ProtocolConfig::for_version(version, addr(FACTORY))
}

pub fn metadata(symbol: &str, total_supply: BigInt) -> TokenMetadata {
    TokenMetadata {
        symbol: symbol.to_string(),
        decimals: 18,
        name: format!("{} Talent Token", symbol),
        max_supply: e18(1_000_000),
        total_supply,
    }
}

pub fn reader() -> StaticContractReader {
    StaticContractReader::new()
        .with_token(&addr(TOKEN_T), metadata("TTT", e18(10_000)))
        .with_token(&addr(TOKEN_U), metadata("UUU", e18(10_000)))
        .with_owner(&addr(TOKEN_T), &addr(TALENT_A))
        .with_owner(&addr(TOKEN_U), &addr(TALENT_A))
}

pub async fn indexer(version: ProtocolVersion) -> TestIndexer {
    Indexer::new(protocol(version), MemoryStore::new(), reader())
        .await
        .unwrap()
}

/// Hands out strictly increasing event positions
pub struct Chain {
    block: u64,
}

impl Chain {
    pub fn new() -> Self {
        Self { block: 0 }
    }

    pub fn next(&mut self, event: ProtocolEvent) -> EventEnvelope {
        self.block += 1;
        EventEnvelope::new(self.block, 0, event)
    }
}

pub fn talent_created(token: &str, talent: &str, ts: u64) -> ProtocolEvent {
    ProtocolEvent::TalentCreated(TalentCreatedEvent {
        token: addr(token),
        talent: addr(talent),
        block_timestamp: ts,
    })
}

pub fn transfer(token: &str, ts: u64) -> ProtocolEvent {
    ProtocolEvent::Transfer(TransferEvent {
        token_address: addr(token),
        block_timestamp: ts,
    })
}

pub fn stake(token: &str, owner: &str, amount: BigInt, ts: u64) -> ProtocolEvent {
    ProtocolEvent::Stake(StakeEvent {
        talent_token: addr(token),
        owner: addr(owner),
        tal_amount: amount,
        block_timestamp: ts,
    })
}

pub fn unstake(token: &str, owner: &str, amount: BigInt, ts: u64) -> ProtocolEvent {
    ProtocolEvent::Unstake(UnstakeEvent {
        talent_token: addr(token),
        owner: addr(owner),
        tal_amount: amount,
        block_timestamp: ts,
    })
}

pub fn reward_claim(
    token: &str,
    owner: &str,
    staker_reward: BigInt,
    talent_reward: BigInt,
    ts: u64,
) -> ProtocolEvent {
    ProtocolEvent::RewardClaim(RewardClaimEvent {
        talent_token: addr(token),
        owner: addr(owner),
        staker_reward,
        talent_reward,
        block_timestamp: ts,
    })
}

pub fn ownership_change(token: &str, owner: &str, new_owner: &str) -> ProtocolEvent {
    ProtocolEvent::StakeOwnershipChange(StakeOwnershipChangeEvent {
        talent: addr(token),
        owner: addr(owner),
        new_owner: addr(new_owner),
    })
}

pub fn relation_key(supporter: &str, token: &str) -> String {
    format!("{}-{}", supporter, token)
}
