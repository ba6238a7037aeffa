use super::{
    decrement_supporter_count, load_staked_token, load_supporter_or_default, sub_market_cap,
    ReducerContext,
};
use crate::domain::errors::ReducerError;
use crate::domain::models::{SupporterToken, UnstakeEvent};
use crate::domain::protocol::MARKET_CAP_DIVISOR;
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::utils::logging;

/// Reverses a stake
///
/// A supporter whose balance is zero or below after the withdrawal is no
/// longer counted on the token. The check runs on every unstake, so repeated
/// withdrawals keep decrementing `supporterCount`; a negative count is
/// reported as an invariant violation and stored as is.
pub async fn handle_unstake(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &UnstakeEvent,
) -> Result<(), ReducerError> {
    let mut token = load_staked_token(ctx, uow, &event.talent_token, event.block_timestamp).await?;
    token.total_value_locked = token.total_value_locked.checked_sub(&event.tal_amount)?;
    sub_market_cap(ctx, &mut token, &event.tal_amount)?;

    let tal_amount = event.tal_amount.to_decimal();
    let mut supporter = load_supporter_or_default(ctx, uow, &event.owner).await?;
    supporter.total_amount = supporter.total_amount.checked_sub(&tal_amount)?;
    if !supporter.total_amount.is_positive() {
        decrement_supporter_count(uow, &mut token)?;
    }
    uow.save(&supporter)?;

    let key = SupporterToken::key(&event.owner, &event.talent_token);
    let mut relation = uow
        .load::<SupporterToken>(&key)
        .await?
        .unwrap_or_else(|| {
            SupporterToken::new(&event.owner, &event.talent_token, event.block_timestamp)
        });
    relation.tal_amount = relation.tal_amount.checked_sub(&tal_amount)?;
    relation.amount = relation
        .amount
        .checked_sub(&tal_amount.div_int(MARKET_CAP_DIVISOR)?)?;
    uow.save(&relation)?;
    uow.save(&token)?;

    logging::log_debug(&format!(
        "{} unstaked {} TAL from {}",
        event.owner, event.tal_amount, event.talent_token
    ));

    Ok(())
}
