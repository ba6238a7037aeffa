use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use talent_indexer::config::AppConfig;
use talent_indexer::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logger();

    let config = AppConfig::from_env();

    logging::log_info("Running database migrations...");

    let connection = Database::connect(&config.database.url).await?;

    Migrator::up(&connection, None).await?;

    logging::log_info("Migrations completed successfully!");

    Ok(())
}
