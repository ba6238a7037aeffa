//! Fixture-backed contract reader
//!
//! Serves metadata and owners registered up front. Supply values can be
//! changed between events to simulate minting and burning.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::models::Address;
use crate::domain::numeric::BigInt;
use crate::infrastructure::ethereum::error::ContractReadError;
use crate::infrastructure::ethereum::reader::{ContractReader, TokenMetadata};

#[derive(Debug, Default)]
pub struct StaticContractReader {
    tokens: RwLock<HashMap<Address, TokenMetadata>>,
    owners: RwLock<HashMap<Address, Address>>,
    reads: AtomicUsize,
}

impl StaticContractReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(self, token: &Address, metadata: TokenMetadata) -> Self {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(*token, metadata);
        }
        self
    }

    pub fn with_owner(self, token: &Address, talent: &Address) -> Self {
        if let Ok(mut owners) = self.owners.write() {
            owners.insert(*token, *talent);
        }
        self
    }

    pub fn set_total_supply(&self, token: &Address, total_supply: BigInt) {
        if let Ok(mut tokens) = self.tokens.write() {
            if let Some(metadata) = tokens.get_mut(token) {
                metadata.total_supply = total_supply;
            }
        }
    }

    /// Number of reads served, failed ones included
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContractReader for StaticContractReader {
    async fn read_token_metadata(
        &self,
        token: &Address,
        _block_number: u64,
    ) -> Result<TokenMetadata, ContractReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .read()
            .ok()
            .and_then(|tokens| tokens.get(token).cloned())
            .ok_or_else(|| ContractReadError::NotFound(token.to_string()))
    }

    async fn read_token_owner(
        &self,
        token: &Address,
        _block_number: u64,
    ) -> Result<Address, ContractReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.owners
            .read()
            .ok()
            .and_then(|owners| owners.get(token).cloned())
            .ok_or_else(|| ContractReadError::NotFound(token.to_string()))
    }
}
