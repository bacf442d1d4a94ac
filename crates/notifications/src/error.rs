use crate::database::DbError;
use query_builder::error::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationsError {
    /// A selector referenced an unmapped property, or the query shape was
    /// invalid. A configuration/programming error, not recoverable.
    #[error("query construction failed: {0}")]
    Query(#[from] QueryError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("row decode failed: {0}")]
    Decode(String),
}
