//! Typed, per-event view over the entity store
//!
//! Reducers load and save aggregates through a [`UnitOfWork`]. Writes are kept
//! in memory (and are visible to later loads of the same event) until the
//! engine turns them into a [`ChangeSet`] and commits it in one step.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::domain::models::{DataSource, Entity, EntityKind, EventCursor};
use crate::infrastructure::persistence::error::DbError;
use crate::infrastructure::persistence::store::{ChangeSet, EntityStore, EntityWrite};
use crate::utils::logging;

/// A broken aggregate invariant, reported rather than prevented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub kind: EntityKind,
    pub id: String,
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.id, self.message)
    }
}

type Key = (EntityKind, String);

pub struct UnitOfWork<'a> {
    store: &'a dyn EntityStore,
    // `None` marks a removed record
    staged: HashMap<Key, Option<Value>>,
    write_order: Vec<Key>,
    data_sources: Vec<DataSource>,
    violations: Vec<InvariantViolation>,
}

impl<'a> UnitOfWork<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self {
            store,
            staged: HashMap::new(),
            write_order: Vec::new(),
            data_sources: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Loads an entity, seeing writes staged earlier in this unit of work
    pub async fn load<E: Entity>(&mut self, id: &str) -> Result<Option<E>, DbError> {
        let key = (E::KIND, id.to_string());
        let value = match self.staged.get(&key) {
            Some(staged) => staged.clone(),
            None => self.store.load(E::KIND, id).await?,
        };

        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn save<E: Entity>(&mut self, entity: &E) -> Result<(), DbError> {
        let value = serde_json::to_value(entity)?;
        self.stage((E::KIND, entity.id().to_string()), Some(value));
        Ok(())
    }

    pub fn remove<E: Entity>(&mut self, id: &str) {
        self.stage((E::KIND, id.to_string()), None);
    }

    fn stage(&mut self, key: Key, value: Option<Value>) {
        if !self.staged.contains_key(&key) {
            self.write_order.push(key.clone());
        }
        self.staged.insert(key, value);
    }

    /// Asks the host to start following a new contract
    pub fn register_data_source(&mut self, data_source: DataSource) {
        if !self
            .data_sources
            .iter()
            .any(|existing| existing.address == data_source.address)
        {
            self.data_sources.push(data_source);
        }
    }

    pub fn record_violation(&mut self, violation: InvariantViolation) {
        logging::log_warning(&format!("Invariant violated: {}", violation));
        self.violations.push(violation);
    }

    /// Consumes the unit of work into the change set to commit
    pub fn into_change_set(mut self, cursor: EventCursor) -> (ChangeSet, Vec<InvariantViolation>) {
        let writes = self
            .write_order
            .into_iter()
            .map(|(kind, id)| match self.staged.remove(&(kind, id.clone())).flatten() {
                Some(data) => EntityWrite::Put { kind, id, data },
                None => EntityWrite::Remove { kind, id },
            })
            .collect();

        let changes = ChangeSet {
            writes,
            data_sources: self.data_sources,
            cursor,
        };

        (changes, self.violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Address, Factory};
    use crate::domain::numeric::BigInt;
    use crate::infrastructure::persistence::MemoryStore;
    use std::str::FromStr;

    fn factory_address() -> Address {
        Address::from_str("0x5555555555555555555555555555555555555555").unwrap()
    }

    fn cursor() -> EventCursor {
        EventCursor {
            block_number: 1,
            log_index: 0,
        }
    }

    #[tokio::test]
    async fn test_reads_own_writes_before_commit() {
        let store = MemoryStore::new();
        let mut uow = UnitOfWork::new(&store);
        let id = factory_address().to_string();

        assert!(uow.load::<Factory>(&id).await.unwrap().is_none());

        let mut factory = Factory::new(&factory_address());
        factory.talent_count = BigInt::from_u64(3);
        uow.save(&factory).unwrap();

        let reloaded = uow.load::<Factory>(&id).await.unwrap().unwrap();
        assert_eq!(reloaded.talent_count, BigInt::from_u64(3));
        assert!(store.get::<Factory>(&id).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_change_set_keeps_first_write_order_and_last_value() {
        let store = MemoryStore::new();
        let mut uow = UnitOfWork::new(&store);
        let mut factory = Factory::new(&factory_address());

        uow.save(&factory).unwrap();
        factory.talent_count = BigInt::one();
        uow.save(&factory).unwrap();
        uow.remove::<Factory>("0xgone");

        let (changes, violations) = uow.into_change_set(cursor());
        assert!(violations.is_empty());
        assert_eq!(changes.writes.len(), 2);
        match &changes.writes[0] {
            EntityWrite::Put { data, .. } => assert_eq!(data["talentCount"], "1"),
            other => panic!("unexpected write {:?}", other),
        }
        assert!(matches!(&changes.writes[1], EntityWrite::Remove { id, .. } if id == "0xgone"));
    }

    #[tokio::test]
    async fn test_removed_entity_loads_as_absent() {
        let store = MemoryStore::new();
        let factory = Factory::new(&factory_address());
        let mut seed = UnitOfWork::new(&store);
        seed.save(&factory).unwrap();
        let (changes, _) = seed.into_change_set(cursor());
        store.commit(&changes).await.unwrap();

        let mut uow = UnitOfWork::new(&store);
        uow.remove::<Factory>(&factory.id);
        assert!(uow.load::<Factory>(&factory.id).await.unwrap().is_none());
    }

    #[test]
    fn test_data_sources_are_deduplicated() {
        let store = MemoryStore::new();
        let mut uow = UnitOfWork::new(&store);
        uow.register_data_source(DataSource::talent_token(&factory_address(), 1));
        uow.register_data_source(DataSource::talent_token(&factory_address(), 2));

        let (changes, _) = uow.into_change_set(cursor());
        assert_eq!(changes.data_sources.len(), 1);
        assert_eq!(changes.data_sources[0].created_at_block, 1);
    }
}
