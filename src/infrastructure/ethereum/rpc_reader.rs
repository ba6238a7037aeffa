use alloy::rpc::types::BlockId;
use alloy::sol;
use async_trait::async_trait;

use crate::domain::models::Address;
use crate::domain::numeric::BigInt;
use crate::infrastructure::ethereum::client::EthRpcClient;
use crate::infrastructure::ethereum::error::ContractReadError;
use crate::infrastructure::ethereum::reader::{ContractReader, TokenMetadata};
use crate::utils::logging;

sol! {
    #[sol(rpc)]
    interface ITalentToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function MAX_SUPPLY() external view returns (uint256);
        function totalSupply() external view returns (uint256);
    }

    #[sol(rpc)]
    interface ITalentFactory {
        function tokensToTalents(address token) external view returns (address);
    }
}

/// Contract reader issuing `eth_call`s to a node at the event's block
pub struct RpcContractReader {
    client: EthRpcClient,
    factory_address: Address,
}

impl RpcContractReader {
    pub fn new(client: EthRpcClient, factory_address: Address) -> Self {
        Self {
            client,
            factory_address,
        }
    }
}

#[async_trait]
impl ContractReader for RpcContractReader {
    async fn read_token_metadata(
        &self,
        token: &Address,
        block_number: u64,
    ) -> Result<TokenMetadata, ContractReadError> {
        logging::log_debug(&format!("Reading metadata of {} at block {}", token, block_number));

        let block = BlockId::number(block_number);
        let contract = ITalentToken::new((*token).into(), self.client.provider());

        let symbol = self
            .client
            .read(|| async { contract.symbol().block(block).call().await })
            .await?;
        let decimals = self
            .client
            .read(|| async { contract.decimals().block(block).call().await })
            .await?;
        let name = self
            .client
            .read(|| async { contract.name().block(block).call().await })
            .await?;
        let max_supply = self
            .client
            .read(|| async { contract.MAX_SUPPLY().block(block).call().await })
            .await?;
        let total_supply = self
            .client
            .read(|| async { contract.totalSupply().block(block).call().await })
            .await?;

        Ok(TokenMetadata {
            symbol,
            decimals,
            name,
            max_supply: BigInt::from(max_supply),
            total_supply: BigInt::from(total_supply),
        })
    }

    async fn read_token_owner(
        &self,
        token: &Address,
        block_number: u64,
    ) -> Result<Address, ContractReadError> {
        let block = BlockId::number(block_number);
        let factory = ITalentFactory::new(self.factory_address.into(), self.client.provider());

        let talent = self
            .client
            .read(|| async {
                factory
                    .tokensToTalents((*token).into())
                    .block(block)
                    .call()
                    .await
            })
            .await?;

        Ok(Address::from(talent))
    }
}
