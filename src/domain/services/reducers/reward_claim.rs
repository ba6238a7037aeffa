use super::stake::credit_relationship;
use super::{add_market_cap, load_staked_token, load_supporter_or_default, ReducerContext};
use crate::domain::errors::ReducerError;
use crate::domain::models::RewardClaimEvent;
use crate::domain::numeric::{BigDecimal, NumericError};
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::utils::logging;

/// Compounds a claimed staker reward into the stake and books the talent's share
pub async fn handle_reward_claim(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &RewardClaimEvent,
) -> Result<(), ReducerError> {
    let mut token = load_staked_token(ctx, uow, &event.talent_token, event.block_timestamp).await?;
    token.total_value_locked = token.total_value_locked.checked_add(&event.staker_reward)?;
    add_market_cap(ctx, &mut token, &event.staker_reward)?;

    let staker_reward = event.staker_reward.to_decimal();
    let talent_reward = event.talent_reward.to_decimal();
    token.rewards_ready = accumulate(token.rewards_ready.as_ref(), &talent_reward)?;
    token.rewards_claimed = accumulate(token.rewards_claimed.as_ref(), &staker_reward)?;

    let mut supporter = load_supporter_or_default(ctx, uow, &event.owner).await?;
    supporter.total_amount = supporter.total_amount.checked_add(&staker_reward)?;
    supporter.rewards_claimed = accumulate(supporter.rewards_claimed.as_ref(), &staker_reward)?;
    uow.save(&supporter)?;

    credit_relationship(
        uow,
        &mut token,
        &event.talent_token,
        &event.owner,
        &staker_reward,
        event.block_timestamp,
    )
    .await?;
    uow.save(&token)?;

    logging::log_debug(&format!(
        "{} claimed {} TAL on {} (talent share {})",
        event.owner, event.staker_reward, event.talent_token, event.talent_reward
    ));

    Ok(())
}

// Records written before rewards were tracked start from zero
fn accumulate(
    current: Option<&BigDecimal>,
    amount: &BigDecimal,
) -> Result<Option<BigDecimal>, NumericError> {
    match current {
        Some(value) => value.checked_add(amount).map(Some),
        None => Ok(Some(amount.clone())),
    }
}
