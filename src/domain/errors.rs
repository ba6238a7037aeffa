use std::error::Error;
use std::fmt;

use crate::domain::models::{EventCursor, EventKind};
use crate::domain::numeric::NumericError;
use crate::domain::protocol::ProtocolVersion;
use crate::infrastructure::ethereum::ContractReadError;
use crate::infrastructure::persistence::error::DbError;

/// Error type for a single reducer run
///
/// All variants are integration failures: the event cannot be applied and the
/// host is expected to stop or retry the stream from the last committed event.
#[derive(Debug)]
pub enum ReducerError {
    NumericError(NumericError),
    DbError(DbError),
    ContractReadError(ContractReadError),
}

impl fmt::Display for ReducerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReducerError::NumericError(e) => write!(f, "Numeric error: {}", e),
            ReducerError::DbError(e) => write!(f, "Store error: {}", e),
            ReducerError::ContractReadError(e) => write!(f, "Contract read error: {}", e),
        }
    }
}

impl Error for ReducerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReducerError::NumericError(e) => Some(e),
            ReducerError::DbError(e) => Some(e),
            ReducerError::ContractReadError(e) => Some(e),
        }
    }
}

impl From<NumericError> for ReducerError {
    fn from(error: NumericError) -> Self {
        ReducerError::NumericError(error)
    }
}

impl From<DbError> for ReducerError {
    fn from(error: DbError) -> Self {
        ReducerError::DbError(error)
    }
}

impl From<ContractReadError> for ReducerError {
    fn from(error: ContractReadError) -> Self {
        ReducerError::ContractReadError(error)
    }
}

/// Error type for the indexing engine and its host
#[derive(Debug)]
pub enum IndexerError {
    ReducerError {
        cursor: EventCursor,
        kind: EventKind,
        source: ReducerError,
    },
    DbError(DbError),
    /// Event does not come strictly after the last committed one
    OutOfOrder {
        last: EventCursor,
        received: EventCursor,
    },
    /// Event kind not emitted by the configured protocol version
    UnsupportedEvent {
        kind: EventKind,
        version: ProtocolVersion,
    },
    ConfigError(String),
    IoError(std::io::Error),
    /// Malformed event payload
    JsonError {
        line: usize,
        source: serde_json::Error,
    },
}

impl fmt::Display for IndexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexerError::ReducerError {
                cursor,
                kind,
                source,
            } => write!(f, "{} at {} failed: {}", kind, cursor, source),
            IndexerError::DbError(e) => write!(f, "Database error: {}", e),
            IndexerError::OutOfOrder { last, received } => write!(
                f,
                "Event {} received after already committed {}",
                received, last
            ),
            IndexerError::UnsupportedEvent { kind, version } => {
                write!(f, "{} events are not part of protocol {}", kind, version)
            }
            IndexerError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            IndexerError::IoError(e) => write!(f, "I/O error: {}", e),
            IndexerError::JsonError { line, source } => {
                write!(f, "Malformed event on line {}: {}", line, source)
            }
        }
    }
}

impl Error for IndexerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IndexerError::ReducerError { source, .. } => Some(source),
            IndexerError::DbError(e) => Some(e),
            IndexerError::IoError(e) => Some(e),
            IndexerError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DbError> for IndexerError {
    fn from(error: DbError) -> Self {
        IndexerError::DbError(error)
    }
}

impl From<std::io::Error> for IndexerError {
    fn from(error: std::io::Error) -> Self {
        IndexerError::IoError(error)
    }
}
