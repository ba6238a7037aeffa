//! In-memory entity store for tests and offline replays

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::models::{DataSource, Entity, EntityKind, EventCursor};
use crate::infrastructure::persistence::error::DbError;
use crate::infrastructure::persistence::store::{ChangeSet, EntityStore, EntityWrite};

#[derive(Debug, Default)]
struct MemoryState {
    records: HashMap<(EntityKind, String), Value>,
    data_sources: Vec<DataSource>,
    cursor: Option<EventCursor>,
}

/// Thread-safe store keeping every record in a hash map
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed read used by tests and reports
    pub fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, DbError> {
        let state = self.read_state()?;
        match state.records.get(&(E::KIND, id.to_string())) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.state
            .read()
            .map(|s| s.records.keys().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    pub fn data_sources(&self) -> Vec<DataSource> {
        self.state
            .read()
            .map(|s| s.data_sources.clone())
            .unwrap_or_default()
    }

    fn read_state(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryState>, DbError> {
        self.state
            .read()
            .map_err(|_| DbError::QueryError("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, DbError> {
        let state = self.read_state()?;
        Ok(state.records.get(&(kind, id.to_string())).cloned())
    }

    async fn load_cursor(&self) -> Result<Option<EventCursor>, DbError> {
        Ok(self.read_state()?.cursor)
    }

    async fn commit(&self, changes: &ChangeSet) -> Result<(), DbError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| DbError::QueryError("memory store lock poisoned".to_string()))?;

        for write in &changes.writes {
            match write {
                EntityWrite::Put { kind, id, data } => {
                    state.records.insert((*kind, id.clone()), data.clone());
                }
                EntityWrite::Remove { kind, id } => {
                    state.records.remove(&(*kind, id.clone()));
                }
            }
        }

        for data_source in &changes.data_sources {
            if !state.data_sources.iter().any(|d| d.address == data_source.address) {
                state.data_sources.push(data_source.clone());
            }
        }

        state.cursor = Some(changes.cursor);
        Ok(())
    }
}
