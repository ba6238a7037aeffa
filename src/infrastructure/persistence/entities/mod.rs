pub mod data_sources;
pub mod entity_records;
pub mod indexer_cursor;

