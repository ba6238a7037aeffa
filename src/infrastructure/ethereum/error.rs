use alloy::transports::{RpcError, TransportErrorKind};
use std::error::Error;
use std::fmt;

/// Error type for contract reads
#[derive(Debug)]
pub enum ContractReadError {
    /// Node unreachable, timed out or answered with a non-JSON-RPC response
    TransportError(String),
    /// JSON-RPC error object returned by the node (reverts included)
    RpcError { code: i64, message: String },
    /// Call result could not be ABI-decoded
    DecodeError(String),
    /// No data known for the contract
    NotFound(String),
    /// Client could not be built from the configuration
    ConfigError(String),
}

impl ContractReadError {
    /// Whether retrying the same read may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ContractReadError::TransportError(_))
    }
}

impl fmt::Display for ContractReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractReadError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            ContractReadError::RpcError { code, message } => {
                write!(f, "RPC error {}: {}", code, message)
            }
            ContractReadError::DecodeError(msg) => write!(f, "ABI decode error: {}", msg),
            ContractReadError::NotFound(address) => write!(f, "No contract data for {}", address),
            ContractReadError::ConfigError(msg) => write!(f, "RPC configuration error: {}", msg),
        }
    }
}

impl Error for ContractReadError {}

impl From<RpcError<TransportErrorKind>> for ContractReadError {
    fn from(error: RpcError<TransportErrorKind>) -> Self {
        match error {
            RpcError::ErrorResp(payload) => ContractReadError::RpcError {
                code: payload.code,
                message: payload.message.to_string(),
            },
            RpcError::Transport(kind) => ContractReadError::TransportError(kind.to_string()),
            other => ContractReadError::DecodeError(other.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for ContractReadError {
    fn from(error: alloy::contract::Error) -> Self {
        match error {
            alloy::contract::Error::TransportError(e) => ContractReadError::from(e),
            other => ContractReadError::DecodeError(other.to_string()),
        }
    }
}
