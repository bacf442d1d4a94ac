//! The database-execution seam.
//!
//! The repository only ever hands finalized SQL and parameters across this
//! trait; connection handling, transactions and pooling all live behind it.

use model::core::value::Value;
use model::records::row::RowData;
use query_builder::mapping::TableMapping;
use query_builder::render::SqlQuery;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("query execution failed: {0}")]
    Execution(String),

    #[error("scalar query returned no value")]
    NoValue,
}

/// Synchronous database execution API.
pub trait Database {
    /// Runs a finalized query and returns the flat result rows.
    fn fetch(&self, query: &SqlQuery) -> Result<Vec<RowData>, DbError>;

    /// Runs a finalized query and returns the first column of the first row.
    fn execute_scalar(&self, query: &SqlQuery) -> Result<Value, DbError>;

    /// Inserts one row into the table described by `mapping`, with values
    /// keyed by property name.
    fn insert(&self, mapping: &'static TableMapping, row: &RowData) -> Result<(), DbError>;

    /// Deletes rows matching a raw predicate (including the `WHERE`
    /// keyword) with named parameters; returns the number of rows deleted.
    fn delete(
        &self,
        table: &str,
        predicate: &str,
        params: &[(&str, Value)],
    ) -> Result<u64, DbError>;
}
