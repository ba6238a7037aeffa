//! Keyed entity store used by the reducers
//!
//! Records are exchanged as JSON documents addressed by `(kind, id)`. Loading a
//! key that was never saved returns `Ok(None)`; absence is how reducers decide
//! to create an aggregate. All writes of one event travel together in a
//! [`ChangeSet`] and are applied all-or-nothing.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::models::{DataSource, EntityKind, EventCursor};
use crate::infrastructure::persistence::error::DbError;

/// One staged mutation of the entity store
#[derive(Debug, Clone, PartialEq)]
pub enum EntityWrite {
    Put {
        kind: EntityKind,
        id: String,
        data: Value,
    },
    Remove {
        kind: EntityKind,
        id: String,
    },
}

/// Everything a single event changes
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub writes: Vec<EntityWrite>,
    pub data_sources: Vec<DataSource>,
    pub cursor: EventCursor,
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Loads the record stored under `(kind, id)`
    async fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, DbError>;

    /// Position of the last committed event
    async fn load_cursor(&self) -> Result<Option<EventCursor>, DbError>;

    /// Applies all writes, registers data sources and advances the cursor atomically
    async fn commit(&self, changes: &ChangeSet) -> Result<(), DbError>;
}
