//! Daily total-supply snapshots
//!
//! One record per token and UTC day. Every transfer of the day overwrites it,
//! so the record ends up holding the supply seen by the day's last transfer.

use crate::domain::models::token_day_data::SECONDS_PER_DAY;
use crate::domain::models::{Address, TokenDayData};
use crate::domain::numeric::BigInt;
use crate::domain::services::unit_of_work::UnitOfWork;
use crate::infrastructure::persistence::error::DbError;

pub fn token_day_data(token: &Address, timestamp: u64, total_supply: BigInt) -> TokenDayData {
    let day_index = TokenDayData::day_index(timestamp);
    TokenDayData {
        id: TokenDayData::key(token, day_index),
        talent: *token,
        date: day_index * SECONDS_PER_DAY,
        daily_supply: total_supply,
    }
}

/// Upserts the day record for `timestamp`
pub fn record_daily_supply(
    uow: &mut UnitOfWork<'_>,
    token: &Address,
    timestamp: u64,
    total_supply: BigInt,
) -> Result<TokenDayData, DbError> {
    let day = token_day_data(token, timestamp, total_supply);
    uow.save(&day)?;
    Ok(day)
}
