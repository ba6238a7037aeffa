use super::{
    decrement_supporter_count, load_supporter_or_default, load_token_or_default, ReducerContext,
};
use crate::domain::errors::ReducerError;
use crate::domain::models::{StakeOwnershipChangeEvent, SupporterToken};
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::utils::logging;

/// Moves a whole stake position from `owner` to `new_owner`
///
/// Without an existing position for `new_owner` the record is re-keyed as is.
/// Otherwise the amounts are merged into the existing record, which keeps its
/// own timestamps, and the token loses one distinct supporter. The old key is
/// removed from the store in both cases.
pub async fn handle_stake_ownership_change(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &StakeOwnershipChangeEvent,
) -> Result<(), ReducerError> {
    if event.owner == event.new_owner {
        logging::log_debug(&format!(
            "Ownership change of {} stake on {} to itself ignored",
            event.owner, event.talent
        ));
        return Ok(());
    }

    let old_key = SupporterToken::key(&event.owner, &event.talent);
    let position = match uow.load::<SupporterToken>(&old_key).await? {
        Some(position) => position,
        None => {
            logging::log_warning(&format!(
                "No stake of {} on {} to transfer to {}",
                event.owner, event.talent, event.new_owner
            ));
            return Ok(());
        }
    };

    let new_key = SupporterToken::key(&event.new_owner, &event.talent);
    match uow.load::<SupporterToken>(&new_key).await? {
        None => uow.save(&position.rekeyed(&event.new_owner))?,
        Some(mut existing) => {
            existing.amount = existing.amount.checked_add(&position.amount)?;
            existing.tal_amount = existing.tal_amount.checked_add(&position.tal_amount)?;
            uow.save(&existing)?;

            let mut token =
                load_token_or_default(ctx, uow, &event.talent, position.first_time_bought_at)
                    .await?;
            decrement_supporter_count(uow, &mut token)?;
            uow.save(&token)?;
        }
    }
    uow.remove::<SupporterToken>(&old_key);

    let mut previous = load_supporter_or_default(ctx, uow, &event.owner).await?;
    previous.total_amount = previous.total_amount.checked_sub(&position.tal_amount)?;
    uow.save(&previous)?;

    let mut next = load_supporter_or_default(ctx, uow, &event.new_owner).await?;
    next.total_amount = next.total_amount.checked_add(&position.tal_amount)?;
    uow.save(&next)?;

    logging::log_debug(&format!(
        "Moved {} TAL stake on {} from {} to {}",
        position.tal_amount, event.talent, event.owner, event.new_owner
    ));

    Ok(())
}
