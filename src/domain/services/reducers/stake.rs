use super::{add_market_cap, load_staked_token, load_supporter_or_default, ReducerContext};
use crate::domain::errors::ReducerError;
use crate::domain::models::{Address, StakeEvent, SupporterToken, Token};
use crate::domain::numeric::BigDecimal;
use crate::domain::protocol::MARKET_CAP_DIVISOR;
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::utils::logging;

pub async fn handle_stake(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &StakeEvent,
) -> Result<(), ReducerError> {
    let mut token = load_staked_token(ctx, uow, &event.talent_token, event.block_timestamp).await?;
    token.total_value_locked = token.total_value_locked.checked_add(&event.tal_amount)?;
    add_market_cap(ctx, &mut token, &event.tal_amount)?;

    let tal_amount = event.tal_amount.to_decimal();
    let mut supporter = load_supporter_or_default(ctx, uow, &event.owner).await?;
    supporter.total_amount = supporter.total_amount.checked_add(&tal_amount)?;
    uow.save(&supporter)?;

    credit_relationship(
        uow,
        &mut token,
        &event.talent_token,
        &event.owner,
        &tal_amount,
        event.block_timestamp,
    )
    .await?;
    uow.save(&token)?;

    logging::log_debug(&format!(
        "{} staked {} TAL on {}",
        event.owner, event.tal_amount, event.talent_token
    ));

    Ok(())
}

/// Adds a staked amount to the supporter/token relationship
///
/// Creating the relationship counts a new distinct supporter on the token.
pub(super) async fn credit_relationship(
    uow: &mut UnitOfWork<'_>,
    token: &mut Token,
    token_address: &Address,
    owner: &Address,
    tal_amount: &BigDecimal,
    timestamp: u64,
) -> Result<(), ReducerError> {
    let key = SupporterToken::key(owner, token_address);

    let mut relation = match uow.load::<SupporterToken>(&key).await? {
        Some(relation) => relation,
        None => {
            token.supporter_count = token.supporter_count.increment()?;
            SupporterToken::new(owner, token_address, timestamp)
        }
    };

    relation.last_time_bought_at = timestamp;
    relation.tal_amount = relation.tal_amount.checked_add(tal_amount)?;
    relation.amount = relation
        .amount
        .checked_add(&tal_amount.div_int(MARKET_CAP_DIVISOR)?)?;
    uow.save(&relation)?;

    Ok(())
}
