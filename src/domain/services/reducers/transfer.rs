use super::{load_token_or_default, ReducerContext};
use crate::domain::errors::ReducerError;
use crate::domain::models::TransferEvent;
use crate::domain::services::day_rollup;
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::utils::logging;

/// Refreshes the mirrored contract fields of a token
///
/// Sender and receiver are irrelevant here; any transfer is a trigger to
/// re-read the token contract.
pub async fn handle_transfer(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &TransferEvent,
) -> Result<(), ReducerError> {
    let mut token =
        load_token_or_default(ctx, uow, &event.token_address, event.block_timestamp).await?;

    let metadata = ctx
        .reader
        .read_token_metadata(&event.token_address, ctx.block_number)
        .await?;

    token.symbol = Some(metadata.symbol);
    token.decimals = Some(metadata.decimals);
    token.name = Some(metadata.name);
    token.max_supply = Some(metadata.max_supply);
    token.total_supply = Some(metadata.total_supply.clone());
    token.tx_count = token.tx_count.increment()?;
    uow.save(&token)?;

    if ctx.protocol.tracks_day_data {
        day_rollup::record_daily_supply(
            uow,
            &event.token_address,
            event.block_timestamp,
            metadata.total_supply.clone(),
        )?;
    }

    logging::log_debug(&format!(
        "Transfer on {}: supply {}, {} transactions",
        event.token_address, metadata.total_supply, token.tx_count
    ));

    Ok(())
}
