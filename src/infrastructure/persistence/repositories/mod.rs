pub mod data_source_repository;
pub mod entity_repository;

pub use data_source_repository::DataSourceRepository;
pub use entity_repository::EntityRepository;

/// Collection of all repositories
pub struct Repositories {
    /// Repository for aggregate records, cursor included
    pub entity: EntityRepository,
    /// Repository for registered data sources
    pub data_source: DataSourceRepository,
}

impl Repositories {
    /// Create a new Repositories instance
    pub fn new(entity: EntityRepository, data_source: DataSourceRepository) -> Self {
        Self {
            entity,
            data_source,
        }
    }
}
