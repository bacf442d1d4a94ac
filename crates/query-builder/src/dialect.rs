//! Dialect-specific identifier quoting and parameter placeholders.

pub trait Dialect {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for the parameter at `index` (0-based bind
    /// order).
    fn get_placeholder(&self, index: usize) -> String;
}

/// Bracket quoting with 0-based `@N` placeholders: `[umbracoNode].[id] = @0`.
#[derive(Debug, Clone, Default)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{ident}]")
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("@{index}")
    }
}

/// Double-quote quoting with 1-based `$N` placeholders.
#[derive(Debug, Clone, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }
}
