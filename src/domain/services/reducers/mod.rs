//! Event reducers
//!
//! Each reducer follows the same load-or-default, mutate, save pattern
//! against a [`UnitOfWork`]. Differences between protocol generations come
//! from the [`ProtocolConfig`] in the [`ReducerContext`].

pub mod reward_claim;
pub mod stake;
pub mod stake_ownership;
pub mod talent_created;
pub mod transfer;
pub mod unstake;

use crate::domain::errors::ReducerError;
use crate::domain::models::{Address, EntityKind, ProtocolEvent, Supporter, Token};
use crate::domain::numeric::BigInt;
use crate::domain::protocol::ProtocolConfig;
use crate::domain::services::unit_of_work::{InvariantViolation, UnitOfWork};
use crate::infrastructure::ethereum::ContractReader;
use crate::utils::logging;

/// Read-only inputs shared by all reducers for one event
pub struct ReducerContext<'a> {
    pub protocol: &'a ProtocolConfig,
    pub reader: &'a dyn ContractReader,
    /// Block the event was emitted in; contract reads are made at this height
    pub block_number: u64,
}

/// Routes an event to its reducer
pub async fn apply_event(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &ProtocolEvent,
) -> Result<(), ReducerError> {
    match event {
        ProtocolEvent::TalentCreated(e) => talent_created::handle_talent_created(ctx, uow, e).await,
        ProtocolEvent::Transfer(e) => transfer::handle_transfer(ctx, uow, e).await,
        ProtocolEvent::Stake(e) => stake::handle_stake(ctx, uow, e).await,
        ProtocolEvent::Unstake(e) => unstake::handle_unstake(ctx, uow, e).await,
        ProtocolEvent::RewardClaim(e) => reward_claim::handle_reward_claim(ctx, uow, e).await,
        ProtocolEvent::StakeOwnershipChange(e) => {
            stake_ownership::handle_stake_ownership_change(ctx, uow, e).await
        }
    }
}

/// Loads a token, creating a bare one with an unknown owner if absent
async fn load_token_or_default(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    address: &Address,
    timestamp: u64,
) -> Result<Token, ReducerError> {
    match uow.load::<Token>(&address.to_string()).await? {
        Some(token) => Ok(token),
        None => {
            logging::log_debug(&format!(
                "Token {} not indexed yet, creating it with defaults",
                address
            ));
            Ok(Token::new(address, Address::zero(), ctx.protocol, timestamp)?)
        }
    }
}

/// Loads the token a stake-side event refers to
///
/// With lazy owner backfill the talent is looked up on chain and the token
/// goes through the regular creation path, so the factory count and the
/// data source stay consistent when stakes are seen before `TalentCreated`.
async fn load_staked_token(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    address: &Address,
    timestamp: u64,
) -> Result<Token, ReducerError> {
    if !ctx.protocol.lazy_owner_backfill {
        return load_token_or_default(ctx, uow, address, timestamp).await;
    }

    if let Some(token) = uow.load::<Token>(&address.to_string()).await? {
        return Ok(token);
    }

    let talent = ctx.reader.read_token_owner(address, ctx.block_number).await?;
    logging::log_info(&format!(
        "Backfilling token {} owned by talent {}",
        address, talent
    ));
    talent_created::initialize_token(ctx, uow, address, &talent, timestamp).await
}

async fn load_supporter_or_default(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    address: &Address,
) -> Result<Supporter, ReducerError> {
    Ok(uow
        .load::<Supporter>(&address.to_string())
        .await?
        .unwrap_or_else(|| Supporter::new(address, ctx.protocol)))
}

/// Adds `delta / 5` to the market cap, rounded the way this generation rounds
fn add_market_cap(
    ctx: &ReducerContext<'_>,
    token: &mut Token,
    delta: &BigInt,
) -> Result<(), ReducerError> {
    if let (Some(rule), Some(current)) = (ctx.protocol.market_cap, &token.market_cap) {
        let next = current.checked_add(&rule.apply(delta)?)?;
        token.market_cap = Some(next);
    }
    Ok(())
}

fn sub_market_cap(
    ctx: &ReducerContext<'_>,
    token: &mut Token,
    delta: &BigInt,
) -> Result<(), ReducerError> {
    if let (Some(rule), Some(current)) = (ctx.protocol.market_cap, &token.market_cap) {
        let next = current.checked_sub(&rule.apply(delta)?)?;
        token.market_cap = Some(next);
    }
    Ok(())
}

/// Decrements the distinct supporter count, reporting when it drops below zero
fn decrement_supporter_count(
    uow: &mut UnitOfWork<'_>,
    token: &mut Token,
) -> Result<(), ReducerError> {
    token.supporter_count = token.supporter_count.decrement()?;
    if token.supporter_count.is_negative() {
        uow.record_violation(InvariantViolation {
            kind: EntityKind::Token,
            id: token.id.clone(),
            message: format!("supporterCount dropped to {}", token.supporter_count),
        });
    }
    Ok(())
}
