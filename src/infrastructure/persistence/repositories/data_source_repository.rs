use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::str::FromStr;

use crate::domain::models::{Address, DataSource};
use crate::infrastructure::persistence::entities::data_sources;
use crate::infrastructure::persistence::error::DbError;

/// Repository for data sources registered for the host
#[derive(Clone, Debug)]
pub struct DataSourceRepository {
    conn: DatabaseConnection,
}

impl DataSourceRepository {
    /// Create a new DataSourceRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All registered data sources, oldest first
    pub async fn find_all(&self) -> Result<Vec<DataSource>, DbError> {
        let rows = data_sources::Entity::find()
            .order_by_asc(data_sources::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(data_source_from_row).collect()
    }
}

fn data_source_from_row(row: data_sources::Model) -> Result<DataSource, DbError> {
    let address = Address::from_str(&row.address)
        .map_err(|e| DbError::SerializationError(e.to_string()))?;
    let created_at_block = u64::try_from(row.created_at_block).map_err(|_| {
        DbError::SerializationError(format!(
            "data source {} has invalid block {}",
            row.address, row.created_at_block
        ))
    })?;

    Ok(DataSource {
        address,
        template: row.template,
        created_at_block,
    })
}

/// Inserts data sources, ignoring addresses that are already tracked
pub async fn insert_data_sources<C: ConnectionTrait>(
    conn: &C,
    sources: &[DataSource],
) -> Result<(), DbError> {
    for source in sources {
        let created_at_block = i64::try_from(source.created_at_block).map_err(|_| {
            DbError::QueryError(format!("block {} does not fit a BIGINT", source.created_at_block))
        })?;

        let row = data_sources::ActiveModel {
            id: sea_orm::NotSet,
            address: Set(source.address.to_string()),
            template: Set(source.template.clone()),
            created_at_block: Set(created_at_block),
            created_at: Set(Utc::now().into()),
        };

        data_sources::Entity::insert(row)
            .on_conflict(
                OnConflict::column(data_sources::Column::Address)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}
