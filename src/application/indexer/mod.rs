//! Event indexing
//!
//! [`Indexer`] applies decoded events through the reducers and commits each
//! event atomically. [`EventReplayer`] feeds it from a JSON Lines stream.

pub mod engine;
pub mod processor_trait;
pub mod replay;

pub use engine::{Indexer, IndexerStats};
pub use processor_trait::{EventOutcome, EventProcessor};
pub use replay::{EventReplayer, ReplaySummary};
