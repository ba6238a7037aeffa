use alloy::providers::RootProvider;
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use reqwest::{Client, Url};
use std::future::Future;
use std::time::Duration;

use crate::config::AppConfig;
use crate::infrastructure::ethereum::error::ContractReadError;
use crate::utils::retry_handler::RetryHandler;

/// Read-only connection to an Ethereum node
#[derive(Clone)]
pub struct EthRpcClient {
    provider: RootProvider,
    retry: RetryHandler,
}

impl EthRpcClient {
    /// Create a new RPC client over HTTP
    pub fn new(config: &AppConfig) -> Result<Self, ContractReadError> {
        let url = Url::parse(&config.rpc.url)
            .map_err(|e| ContractReadError::ConfigError(format!("ETH_RPC_URL: {}", e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.rpc.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ContractReadError::ConfigError(e.to_string()))?;

        let client = RpcClient::new(Http::with_client(http, url), false);

        Ok(Self {
            provider: RootProvider::new(client),
            retry: RetryHandler::with_config(config.rpc.max_retries, config.rpc.retry_delay_ms),
        })
    }

    pub fn provider(&self) -> &RootProvider {
        &self.provider
    }

    /// Runs a contract read, retrying transport failures only
    ///
    /// Reverts and other node-side errors are returned at once.
    pub async fn read<F, Fut, T>(&self, operation: F) -> Result<T, ContractReadError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, alloy::contract::Error>>,
    {
        self.retry
            .execute_with_retry_when(
                || async { operation().await.map_err(ContractReadError::from) },
                ContractReadError::is_transient,
            )
            .await
    }
}
