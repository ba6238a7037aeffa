use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::application::indexer::processor_trait::{EventOutcome, EventProcessor};
use crate::domain::errors::IndexerError;
use crate::domain::models::{EventCursor, EventEnvelope, EventKind};
use crate::domain::protocol::ProtocolConfig;
use crate::domain::services::{apply_event, ReducerContext, UnitOfWork};
use crate::infrastructure::ethereum::ContractReader;
use crate::infrastructure::persistence::EntityStore;
use crate::utils::logging;

/// Running totals since the indexer was started
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexerStats {
    pub events_processed: u64,
    pub events_by_kind: BTreeMap<EventKind, u64>,
    pub data_sources_created: u64,
    pub invariant_violations: u64,
}

impl IndexerStats {
    fn record(&mut self, outcome: &EventOutcome) {
        self.events_processed += 1;
        *self.events_by_kind.entry(outcome.kind).or_insert(0) += 1;
        self.data_sources_created += outcome.data_sources.len() as u64;
        self.invariant_violations += outcome.invariant_violations.len() as u64;
    }
}

/// Applies events one at a time and commits each one atomically
pub struct Indexer<S: EntityStore, C: ContractReader> {
    protocol: ProtocolConfig,
    store: S,
    reader: C,
    last_committed: Option<EventCursor>,
    stats: IndexerStats,
}

impl<S: EntityStore, C: ContractReader> Indexer<S, C> {
    /// Creates an indexer resuming after the store's last committed event
    pub async fn new(protocol: ProtocolConfig, store: S, reader: C) -> Result<Self, IndexerError> {
        let last_committed = store.load_cursor().await?;

        match last_committed {
            Some(cursor) => logging::log_info(&format!(
                "Resuming protocol {} indexer after event {}",
                protocol.version, cursor
            )),
            None => logging::log_info(&format!(
                "Starting protocol {} indexer from an empty store",
                protocol.version
            )),
        }

        Ok(Self {
            protocol,
            store,
            reader,
            last_committed,
            stats: IndexerStats::default(),
        })
    }

    pub fn protocol(&self) -> &ProtocolConfig {
        &self.protocol
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reader(&self) -> &C {
        &self.reader
    }

    pub fn stats(&self) -> &IndexerStats {
        &self.stats
    }

    /// Gives the store back, e.g. to resume with a new indexer
    pub fn into_store(self) -> S {
        self.store
    }
}

#[async_trait]
impl<S: EntityStore, C: ContractReader> EventProcessor for Indexer<S, C> {
    fn last_committed(&self) -> Option<EventCursor> {
        self.last_committed
    }

    async fn process(&mut self, envelope: &EventEnvelope) -> Result<EventOutcome, IndexerError> {
        let cursor = envelope.cursor();
        if let Some(last) = self.last_committed {
            if cursor <= last {
                return Err(IndexerError::OutOfOrder {
                    last,
                    received: cursor,
                });
            }
        }

        let kind = envelope.event.kind();
        if !self.protocol.supports(kind) {
            return Err(IndexerError::UnsupportedEvent {
                kind,
                version: self.protocol.version,
            });
        }

        let ctx = ReducerContext {
            protocol: &self.protocol,
            reader: &self.reader,
            block_number: envelope.block_number,
        };
        let mut uow = UnitOfWork::new(&self.store);

        apply_event(&ctx, &mut uow, &envelope.event)
            .await
            .map_err(|source| IndexerError::ReducerError {
                cursor,
                kind,
                source,
            })?;

        let (changes, invariant_violations) = uow.into_change_set(cursor);
        self.store.commit(&changes).await?;
        self.last_committed = Some(cursor);

        for data_source in &changes.data_sources {
            logging::log_info(&format!(
                "Tracking {} contract {} from block {}",
                data_source.template, data_source.address, data_source.created_at_block
            ));
        }

        let outcome = EventOutcome {
            cursor,
            kind,
            data_sources: changes.data_sources,
            invariant_violations,
        };
        self.stats.record(&outcome);

        Ok(outcome)
    }
}
