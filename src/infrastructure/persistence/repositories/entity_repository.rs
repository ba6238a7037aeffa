use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde_json::Value;
use std::fmt;

use crate::domain::models::{EntityKind, EventCursor};
use crate::infrastructure::persistence::entities::indexer_cursor::CURSOR_ID;
use crate::infrastructure::persistence::entities::{entity_records, indexer_cursor};
use crate::infrastructure::persistence::error::DbError;
use crate::infrastructure::persistence::repositories::data_source_repository;
use crate::infrastructure::persistence::store::{ChangeSet, EntityStore, EntityWrite};

/// Postgres-backed entity store
#[derive(Clone)]
pub struct EntityRepository {
    conn: DatabaseConnection,
}

impl fmt::Debug for EntityRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository").finish_non_exhaustive()
    }
}

impl EntityRepository {
    /// Create a new EntityRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn apply_write(txn: &DatabaseTransaction, write: &EntityWrite) -> Result<(), DbError> {
        match write {
            EntityWrite::Put { kind, id, data } => {
                let record = entity_records::ActiveModel {
                    kind: Set(kind.as_str().to_string()),
                    id: Set(id.clone()),
                    data: Set(data.clone()),
                    updated_at: Set(Utc::now().into()),
                };

                entity_records::Entity::insert(record)
                    .on_conflict(
                        OnConflict::columns([
                            entity_records::Column::Kind,
                            entity_records::Column::Id,
                        ])
                        .update_columns([
                            entity_records::Column::Data,
                            entity_records::Column::UpdatedAt,
                        ])
                        .to_owned(),
                    )
                    .exec_without_returning(txn)
                    .await?;
            }
            EntityWrite::Remove { kind, id } => {
                entity_records::Entity::delete_many()
                    .filter(entity_records::Column::Kind.eq(kind.as_str()))
                    .filter(entity_records::Column::Id.eq(id.as_str()))
                    .exec(txn)
                    .await?;
            }
        }

        Ok(())
    }

    async fn save_cursor(txn: &DatabaseTransaction, cursor: &EventCursor) -> Result<(), DbError> {
        let row = indexer_cursor::ActiveModel {
            id: Set(CURSOR_ID.to_string()),
            block_number: Set(to_i64(cursor.block_number)?),
            log_index: Set(to_i64(cursor.log_index)?),
            updated_at: Set(Utc::now().into()),
        };

        indexer_cursor::Entity::insert(row)
            .on_conflict(
                OnConflict::column(indexer_cursor::Column::Id)
                    .update_columns([
                        indexer_cursor::Column::BlockNumber,
                        indexer_cursor::Column::LogIndex,
                        indexer_cursor::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl EntityStore for EntityRepository {
    async fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, DbError> {
        let record = entity_records::Entity::find_by_id((kind.as_str().to_string(), id.to_string()))
            .one(&self.conn)
            .await?;

        Ok(record.map(|model| model.data))
    }

    async fn load_cursor(&self) -> Result<Option<EventCursor>, DbError> {
        let row = indexer_cursor::Entity::find_by_id(CURSOR_ID.to_string())
            .one(&self.conn)
            .await?;

        match row {
            Some(model) => Ok(Some(EventCursor {
                block_number: to_u64(model.block_number)?,
                log_index: to_u64(model.log_index)?,
            })),
            None => Ok(None),
        }
    }

    async fn commit(&self, changes: &ChangeSet) -> Result<(), DbError> {
        let txn = self.conn.begin().await?;

        for write in &changes.writes {
            Self::apply_write(&txn, write).await?;
        }
        data_source_repository::insert_data_sources(&txn, &changes.data_sources).await?;
        Self::save_cursor(&txn, &changes.cursor).await?;

        txn.commit().await?;
        Ok(())
    }
}

fn to_i64(value: u64) -> Result<i64, DbError> {
    i64::try_from(value).map_err(|_| DbError::QueryError(format!("{} does not fit a BIGINT", value)))
}

fn to_u64(value: i64) -> Result<u64, DbError> {
    u64::try_from(value).map_err(|_| DbError::QueryError(format!("negative position {}", value)))
}
