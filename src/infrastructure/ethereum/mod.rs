pub mod client;
pub mod error;
pub mod reader;
pub mod rpc_reader;
pub mod static_reader;

pub use client::EthRpcClient;
pub use error::ContractReadError;
pub use reader::{ContractReader, TokenMetadata};
pub use rpc_reader::RpcContractReader;
pub use static_reader::StaticContractReader;
