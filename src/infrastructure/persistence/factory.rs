use sea_orm::DatabaseConnection;

use crate::infrastructure::persistence::connection::DbPool;
use crate::infrastructure::persistence::repositories::{
    DataSourceRepository, EntityRepository, Repositories,
};

/// Factory for creating repositories
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create all repositories
    pub fn create_repositories(db_pool: &DbPool) -> Repositories {
        let conn = db_pool.get_connection().clone();

        Repositories::new(
            Self::create_entity_repository(conn.clone()),
            Self::create_data_source_repository(conn),
        )
    }

    /// Create an entity repository
    pub fn create_entity_repository(conn: DatabaseConnection) -> EntityRepository {
        EntityRepository::new(conn)
    }

    /// Create a data source repository
    pub fn create_data_source_repository(conn: DatabaseConnection) -> DataSourceRepository {
        DataSourceRepository::new(conn)
    }
}
