//! Common, reusable nodes shared by the select fragment.

/// A column qualified by its mapped table name. Qualification always uses
/// the physical table name, never the entity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualCol {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}
