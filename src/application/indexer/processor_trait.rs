use async_trait::async_trait;

use crate::domain::errors::IndexerError;
use crate::domain::models::{DataSource, EventCursor, EventEnvelope, EventKind};
use crate::domain::services::InvariantViolation;

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub cursor: EventCursor,
    pub kind: EventKind,
    /// Contracts the host should start following
    pub data_sources: Vec<DataSource>,
    pub invariant_violations: Vec<InvariantViolation>,
}

/// Consumer of an ordered event stream
#[async_trait]
pub trait EventProcessor: Send {
    /// Position of the last event whose effects are committed
    fn last_committed(&self) -> Option<EventCursor>;

    /// Applies one event and commits its effects
    async fn process(&mut self, envelope: &EventEnvelope) -> Result<EventOutcome, IndexerError>;
}
