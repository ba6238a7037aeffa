pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_entity_tables;
mod m20261018_000002_create_indexer_cursor;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_entity_tables::Migration),
            Box::new(m20261018_000002_create_indexer_cursor::Migration),
        ]
    }
}
