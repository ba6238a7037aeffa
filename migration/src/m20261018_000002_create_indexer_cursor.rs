use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IndexerCursor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IndexerCursor::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IndexerCursor::BlockNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IndexerCursor::LogIndex).big_integer().not_null())
                    .col(
                        ColumnDef::new(IndexerCursor::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IndexerCursor::Table).to_owned())
            .await
    }
}

// Single-row table holding the last committed event position
#[derive(Iden)]
enum IndexerCursor {
    Table,
    Id,
    BlockNumber,
    LogIndex,
    UpdatedAt,
}
