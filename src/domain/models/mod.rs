pub mod address;
pub mod data_source;
pub mod event;
pub mod factory;
pub mod supporter;
pub mod supporter_token;
pub mod token;
pub mod token_day_data;

pub use address::{Address, InvalidAddress};
pub use data_source::{DataSource, TALENT_TOKEN_TEMPLATE};
pub use event::{
    EventCursor, EventEnvelope, EventKind, ProtocolEvent, RewardClaimEvent, StakeEvent,
    StakeOwnershipChangeEvent, TalentCreatedEvent, TransferEvent, UnstakeEvent,
};
pub use factory::Factory;
pub use supporter::Supporter;
pub use supporter_token::SupporterToken;
pub use token::Token;
pub use token_day_data::TokenDayData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five aggregate kinds kept in the entity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Factory,
    Token,
    Supporter,
    SupporterToken,
    TokenDayData,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Factory => "Factory",
            EntityKind::Token => "Token",
            EntityKind::Supporter => "Supporter",
            EntityKind::SupporterToken => "SupporterToken",
            EntityKind::TokenDayData => "TokenDayData",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record addressable by string key in the entity store
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}
