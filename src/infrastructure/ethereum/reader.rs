use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::Address;
use crate::domain::numeric::BigInt;
use crate::infrastructure::ethereum::error::ContractReadError;

/// Contract-level fields mirrored onto the Token aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
    pub max_supply: BigInt,
    pub total_supply: BigInt,
}

/// Read-only view of talent token and factory contracts
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Reads token metadata as of `block_number`
    async fn read_token_metadata(
        &self,
        token: &Address,
        block_number: u64,
    ) -> Result<TokenMetadata, ContractReadError>;

    /// Looks up the talent that owns `token`
    async fn read_token_owner(
        &self,
        token: &Address,
        block_number: u64,
    ) -> Result<Address, ContractReadError>;
}
