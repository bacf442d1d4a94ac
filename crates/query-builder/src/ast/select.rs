//! The finalized select fragment.

use crate::ast::common::{CmpOp, OrderDir, QualCol};
use model::core::value::Value;

/// A fully resolved select query: every table and column name has already
/// been looked up in the entity mappings, so rendering is a pure function
/// of these fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub columns: SelectList,
    /// The base table. Exactly one per query.
    pub from: Option<&'static str>,
    /// JOIN clauses, rendered in call order.
    pub joins: Vec<JoinClause>,
    /// WHERE predicates, combined with `AND` in call order.
    pub filters: Vec<Filter>,
    /// ORDER BY terms, accumulated in call order.
    pub order_by: Vec<OrderByExpr>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectList {
    /// `SELECT *`
    #[default]
    Star,
    /// A verbatim select list, e.g. `DISTINCT umbracoNode.id AS nodeId, ...`
    Raw(String),
    /// Resolved column groups: the first group carries the base entity's
    /// columns, each further group one expanded reference.
    Columns(Vec<ColumnGroup>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub columns: Vec<SelectColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    pub source: QualCol,
    /// Alias the column is exposed under. For nested projections this is
    /// the `__`-joined property path, e.g. `Dto2__Dto3__Id`.
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub table: &'static str,
    pub left: QualCol,
    pub right: QualCol,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `([t].[c] = @n)` or `<>`.
    Compare {
        column: QualCol,
        op: CmpOp,
        value: Value,
    },
    /// `([t].[c] IN (@n,@n+1,...))`. An empty value list renders as `IN ()`;
    /// skipping the clause for empty collections is the caller's contract.
    In { column: QualCol, values: Vec<Value> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub column: QualCol,
    pub direction: OrderDir,
}
