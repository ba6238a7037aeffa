use super::ReducerContext;
use crate::domain::errors::ReducerError;
use crate::domain::models::{Address, DataSource, Factory, TalentCreatedEvent, Token};
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::utils::logging;

/// Registers a new talent token
///
/// A token already created through a stake backfill is left untouched. A
/// token created with defaults by an earlier event has no talent yet; it gets
/// its talent recorded and is counted on the factory now.
pub async fn handle_talent_created(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    event: &TalentCreatedEvent,
) -> Result<(), ReducerError> {
    let Some(mut token) = uow.load::<Token>(&event.token.to_string()).await? else {
        initialize_token(ctx, uow, &event.token, &event.talent, event.block_timestamp).await?;
        return Ok(());
    };

    if !token.owner.is_zero() {
        logging::log_warning(&format!(
            "Talent token {} already created for {}, ignoring creation for {}",
            event.token, token.owner, event.talent
        ));
        return Ok(());
    }

    count_talent(ctx, uow).await?;
    token.owner = event.talent;
    uow.save(&token)?;
    uow.register_data_source(DataSource::talent_token(&event.token, ctx.block_number));

    logging::log_debug(&format!(
        "Talent {} recorded for already indexed token {}",
        event.talent, event.token
    ));

    Ok(())
}

/// Counts a new talent on the factory, creates its token and subscribes to it
pub(super) async fn initialize_token(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
    address: &Address,
    talent: &Address,
    timestamp: u64,
) -> Result<Token, ReducerError> {
    let factory = count_talent(ctx, uow).await?;

    let token = Token::new(address, *talent, ctx.protocol, timestamp)?;
    uow.save(&token)?;
    uow.register_data_source(DataSource::talent_token(address, ctx.block_number));

    logging::log_debug(&format!(
        "Talent token {} created for {} (talents: {})",
        address, talent, factory.talent_count
    ));

    Ok(token)
}

async fn count_talent(
    ctx: &ReducerContext<'_>,
    uow: &mut UnitOfWork<'_>,
) -> Result<Factory, ReducerError> {
    let factory_address = &ctx.protocol.factory_address;
    let mut factory = uow
        .load::<Factory>(&factory_address.to_string())
        .await?
        .unwrap_or_else(|| Factory::new(factory_address));
    factory.talent_count = factory.talent_count.increment()?;
    uow.save(&factory)?;
    Ok(factory)
}
