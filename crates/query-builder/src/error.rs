use thiserror::Error;

/// Failures raised while a query fragment is being constructed, before any
/// SQL text exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("no column mapped for property `{property}` on table `{table}`")]
    UnknownProperty {
        table: &'static str,
        property: &'static str,
    },

    #[error("no reference mapped for property `{property}` on table `{table}`")]
    UnknownReference {
        table: &'static str,
        property: &'static str,
    },

    #[error("query has no base table; call `from` before `build`")]
    MissingFrom,

    #[error("base table already set to `{table}`; a query has exactly one FROM")]
    DuplicateFrom { table: &'static str },
}
