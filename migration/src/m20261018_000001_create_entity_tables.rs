use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Aggregates are stored as JSON documents keyed by (kind, id)
        manager
            .create_table(
                Table::create()
                    .table(EntityRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EntityRecords::Kind).text().not_null())
                    .col(ColumnDef::new(EntityRecords::Id).text().not_null())
                    .col(ColumnDef::new(EntityRecords::Data).json_binary().not_null())
                    .col(
                        ColumnDef::new(EntityRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(EntityRecords::Kind)
                            .col(EntityRecords::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DataSources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DataSources::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DataSources::Address)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DataSources::Template).text().not_null())
                    .col(
                        ColumnDef::new(DataSources::CreatedAtBlock)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DataSources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entity_records_kind")
                    .table(EntityRecords::Table)
                    .col(EntityRecords::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DataSources::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EntityRecords::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Entity records table
#[derive(Iden)]
enum EntityRecords {
    Table,
    Kind,
    Id,
    Data,
    UpdatedAt,
}

// Data sources table
#[derive(Iden)]
enum DataSources {
    Table,
    Id,
    Address,
    Template,
    CreatedAtBlock,
    CreatedAt,
}
