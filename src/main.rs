use anyhow::Context;
use std::fs::File;
use std::io::BufReader;

use talent_indexer::application::indexer::{EventReplayer, Indexer, ReplaySummary};
use talent_indexer::config::{AppConfig, StoreBackend};
use talent_indexer::domain::protocol::ProtocolConfig;
use talent_indexer::infrastructure::ethereum::{EthRpcClient, RpcContractReader};
use talent_indexer::infrastructure::persistence::{DbPool, MemoryStore, RepositoryFactory};
use talent_indexer::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logger();

    let config = AppConfig::from_env();
    let protocol = config.protocol_config()?;

    logging::log_info(&format!(
        "talent-indexer {} (protocol {}, factory {})",
        env!("CARGO_PKG_VERSION"),
        protocol.version,
        protocol.factory_address
    ));

    tokio::select! {
        result = run(&config, protocol) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            logging::log_warning("Interrupted, the next run resumes after the last committed event");
        }
    }

    Ok(())
}

async fn run(config: &AppConfig, protocol: ProtocolConfig) -> anyhow::Result<ReplaySummary> {
    let client = EthRpcClient::new(config)?;
    let reader = RpcContractReader::new(client, protocol.factory_address);

    let file = File::open(&config.indexer.events_path)
        .with_context(|| format!("Failed to open events file {}", config.indexer.events_path))?;
    let input = BufReader::new(file);
    let replayer = EventReplayer::new(config.indexer.progress_log_interval);

    let summary = match config.database.backend {
        StoreBackend::Memory => {
            logging::log_warning("Using the in-memory store, nothing will be persisted");
            let mut indexer = Indexer::new(protocol, MemoryStore::new(), reader).await?;
            replayer.replay(&mut indexer, input).await?
        }
        StoreBackend::Postgres => {
            let db_pool = DbPool::new(config).await?;
            let repositories = RepositoryFactory::create_repositories(&db_pool);

            let tracked = repositories.data_source.find_all().await?;
            logging::log_info(&format!("{} talent token contracts tracked", tracked.len()));

            let mut indexer = Indexer::new(protocol, repositories.entity, reader).await?;
            replayer.replay(&mut indexer, input).await?
        }
    };

    Ok(summary)
}
