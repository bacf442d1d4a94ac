//! Declarative entity-to-table mappings and the typed selector tokens that
//! drive the select builder.
//!
//! Entities implement [`Mapped`] and expose `const` [`Col`]/[`Ref`] tokens
//! for their mapped properties. The builder resolves tokens against the
//! mapping when a clause is added, so a token naming an unmapped property
//! fails the whole query instead of producing wrong SQL.

use crate::ast::common::CmpOp;
use model::core::value::Value;

/// The mapping of one entity onto a physical table.
#[derive(Debug)]
pub struct TableMapping {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnMapping],
    pub references: &'static [ReferenceMapping],
}

impl TableMapping {
    pub fn column(&self, property: &str) -> Option<&'static ColumnMapping> {
        self.columns.iter().find(|c| c.property == property)
    }

    pub fn reference(&self, property: &str) -> Option<&'static ReferenceMapping> {
        self.references.iter().find(|r| r.property == property)
    }
}

/// Links one typed property to a physical column.
#[derive(Debug)]
pub struct ColumnMapping {
    pub property: &'static str,
    pub column: &'static str,
    pub nullable: bool,
    pub auto_increment: bool,
}

/// Marks a property as a relation to another mapped entity. Single and
/// collection references expand identically during projection; the
/// cardinality only matters to the storage layer demultiplexing rows.
#[derive(Debug)]
pub struct ReferenceMapping {
    pub property: &'static str,
    pub target: fn() -> &'static TableMapping,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// An entity with a static table mapping.
pub trait Mapped {
    fn mapping() -> &'static TableMapping;
}

/// Typed column selector: names a mapped property of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Col(pub &'static str);

impl Col {
    /// Builds an equality predicate against a literal value.
    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        Predicate {
            col: self,
            op: CmpOp::Eq,
            value: value.into(),
        }
    }

    /// Builds an inequality (`<>`) predicate against a literal value.
    pub fn ne(self, value: impl Into<Value>) -> Predicate {
        Predicate {
            col: self,
            op: CmpOp::NotEq,
            value: value.into(),
        }
    }
}

/// A column-to-literal comparison, not yet resolved against a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub col: Col,
    pub op: CmpOp,
    pub value: Value,
}

/// Typed reference selector: names a mapped relation of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ref(pub &'static str);

/// A nesting tree of reference selectors for multi-level projections.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub reference: Ref,
    pub nested: Vec<Projection>,
}

impl Projection {
    pub fn of(reference: Ref) -> Self {
        Projection {
            reference,
            nested: Vec::new(),
        }
    }

    pub fn with(mut self, child: Projection) -> Self {
        self.nested.push(child);
        self
    }
}
