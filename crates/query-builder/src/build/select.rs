//! Provides the mapping-driven, fluent builder for select fragments.

use crate::ast::common::{OrderDir, QualCol};
use crate::ast::select::{
    ColumnGroup, Filter, JoinClause, OrderByExpr, SelectColumn, SelectList, SelectQuery,
};
use crate::error::QueryError;
use crate::mapping::{Col, Mapped, Predicate, Projection, TableMapping};
use model::core::value::Value;

/// Separator for nested-projection alias paths: `Dto2__Dto3__Id`.
pub const ALIAS_SEPARATOR: &str = "__";

/// The accumulating, mutable builder state for one logical query.
///
/// Mapping lookups run eagerly as clauses are chained; the first failure is
/// latched and surfaced by [`SelectBuilder::build`], so a bad selector can
/// never silently produce wrong SQL.
#[derive(Debug, Default, Clone)]
pub struct SelectBuilder {
    query: SelectQuery,
    error: Option<QueryError>,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the select list with verbatim text, e.g. a `DISTINCT`
    /// projection the typed layer does not model.
    pub fn select_raw(mut self, text: &str) -> Self {
        self.query.columns = SelectList::Raw(text.to_string());
        self
    }

    /// Selects every mapped column of `T` in declared order, each aliased
    /// to its property name and qualified with the mapped table name.
    pub fn select_all<T: Mapped>(mut self) -> Self {
        self.query.columns = SelectList::Columns(vec![full_column_group(T::mapping(), "")]);
        self
    }

    /// Selects only the named columns of `T`, preserving the order given.
    pub fn select_columns<T: Mapped>(mut self, cols: &[Col]) -> Self {
        let mapping = T::mapping();
        let mut group = ColumnGroup {
            columns: Vec::new(),
        };
        for col in cols {
            match mapping.column(col.0) {
                Some(c) => group.columns.push(SelectColumn {
                    source: QualCol {
                        table: mapping.table,
                        column: c.column,
                    },
                    alias: c.property.to_string(),
                }),
                None => self.fail(QueryError::UnknownProperty {
                    table: mapping.table,
                    property: col.0,
                }),
            }
        }
        self.query.columns = SelectList::Columns(vec![group]);
        self
    }

    /// Selects all of `T` plus the recursive expansion of each referenced
    /// entity, with column aliases prefixed by the `__`-joined property
    /// path. Expansion does not verify that the referenced table is joined;
    /// that consistency is the caller's contract.
    pub fn select_all_with<T: Mapped>(mut self, projections: &[Projection]) -> Self {
        let mapping = T::mapping();
        let mut groups = vec![full_column_group(mapping, "")];
        for projection in projections {
            if let Err(e) = expand_reference(mapping, projection, "", &mut groups) {
                self.fail(e);
            }
        }
        self.query.columns = SelectList::Columns(groups);
        self
    }

    /// Sets the base table. A query has exactly one.
    pub fn from<T: Mapped>(mut self) -> Self {
        let table = T::mapping().table;
        match self.query.from {
            None => self.query.from = Some(table),
            Some(existing) => self.fail(QueryError::DuplicateFrom { table: existing }),
        }
        self
    }

    /// Starts an `INNER JOIN` on `J`; complete it with
    /// [`JoinOn::on`]. Joins render in call order.
    pub fn inner_join<J: Mapped>(self) -> JoinOn {
        JoinOn {
            builder: self,
            table: J::mapping().table,
        }
    }

    /// Appends a parenthesized comparison predicate; predicates combine
    /// with `AND` and bind their literals positionally in call order.
    pub fn where_clause<T: Mapped>(mut self, predicate: Predicate) -> Self {
        match resolve::<T>(predicate.col) {
            Ok(column) => self.query.filters.push(Filter::Compare {
                column,
                op: predicate.op,
                value: predicate.value,
            }),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Appends `[t].[c] IN (...)`, binding one positional parameter per
    /// element. Callers must skip this call for empty collections; an empty
    /// list renders as `IN ()` with no guard here.
    pub fn where_in<T: Mapped>(
        mut self,
        col: Col,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        match resolve::<T>(col) {
            Ok(column) => self.query.filters.push(Filter::In {
                column,
                values: values.into_iter().map(Into::into).collect(),
            }),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Appends an ascending order term; multiple calls accumulate, first
    /// call is the primary sort key.
    pub fn order_by<T: Mapped>(self, col: Col) -> Self {
        self.push_order::<T>(col, OrderDir::Asc)
    }

    pub fn order_by_desc<T: Mapped>(self, col: Col) -> Self {
        self.push_order::<T>(col, OrderDir::Desc)
    }

    /// Finalizes the fragment. The first mapping failure recorded while
    /// chaining is returned here, before any SQL text exists.
    pub fn build(self) -> Result<SelectQuery, QueryError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.query.from.is_none() {
            return Err(QueryError::MissingFrom);
        }
        Ok(self.query)
    }

    fn push_order<T: Mapped>(mut self, col: Col, direction: OrderDir) -> Self {
        match resolve::<T>(col) {
            Ok(column) => self.query.order_by.push(OrderByExpr { column, direction }),
            Err(e) => self.fail(e),
        }
        self
    }

    fn fail(&mut self, error: QueryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// Second half of the `inner_join::<J>().on::<L, R>(..)` pair.
#[derive(Debug)]
pub struct JoinOn {
    builder: SelectBuilder,
    table: &'static str,
}

impl JoinOn {
    /// Completes the join with `ON [l].[lc] = [r].[rc]`.
    pub fn on<L: Mapped, R: Mapped>(mut self, left: Col, right: Col) -> SelectBuilder {
        let resolved = resolve::<L>(left).and_then(|l| resolve::<R>(right).map(|r| (l, r)));
        match resolved {
            Ok((left, right)) => self.builder.query.joins.push(JoinClause {
                table: self.table,
                left,
                right,
            }),
            Err(e) => self.builder.fail(e),
        }
        self.builder
    }
}

fn resolve<T: Mapped>(col: Col) -> Result<QualCol, QueryError> {
    let mapping = T::mapping();
    mapping
        .column(col.0)
        .map(|c| QualCol {
            table: mapping.table,
            column: c.column,
        })
        .ok_or(QueryError::UnknownProperty {
            table: mapping.table,
            property: col.0,
        })
}

fn full_column_group(mapping: &'static TableMapping, prefix: &str) -> ColumnGroup {
    let columns = mapping
        .columns
        .iter()
        .map(|c| SelectColumn {
            source: QualCol {
                table: mapping.table,
                column: c.column,
            },
            alias: if prefix.is_empty() {
                c.property.to_string()
            } else {
                format!("{prefix}{ALIAS_SEPARATOR}{}", c.property)
            },
        })
        .collect();
    ColumnGroup { columns }
}

fn expand_reference(
    mapping: &'static TableMapping,
    projection: &Projection,
    prefix: &str,
    groups: &mut Vec<ColumnGroup>,
) -> Result<(), QueryError> {
    let property = projection.reference.0;
    let reference = mapping
        .reference(property)
        .ok_or(QueryError::UnknownReference {
            table: mapping.table,
            property,
        })?;
    let path = if prefix.is_empty() {
        property.to_string()
    } else {
        format!("{prefix}{ALIAS_SEPARATOR}{property}")
    };
    let target = (reference.target)();
    groups.push(full_column_group(target, &path));
    for nested in &projection.nested {
        expand_reference(target, nested, &path, groups)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::common::CmpOp;
    use crate::mapping::{Cardinality, ColumnMapping, Ref, ReferenceMapping};

    struct UserRow;
    struct PostRow;

    impl UserRow {
        const ID: Col = Col("Id");
        const EMAIL: Col = Col("Email");
        const POSTS: Ref = Ref("Posts");
    }

    impl Mapped for UserRow {
        fn mapping() -> &'static TableMapping {
            static MAPPING: TableMapping = TableMapping {
                table: "users",
                primary_key: "id",
                columns: &[
                    ColumnMapping {
                        property: "Id",
                        column: "id",
                        nullable: false,
                        auto_increment: true,
                    },
                    ColumnMapping {
                        property: "Email",
                        column: "email",
                        nullable: false,
                        auto_increment: false,
                    },
                ],
                references: &[ReferenceMapping {
                    property: "Posts",
                    target: <PostRow as Mapped>::mapping,
                    cardinality: Cardinality::Many,
                }],
            };
            &MAPPING
        }
    }

    impl PostRow {
        const USER_ID: Col = Col("UserId");
    }

    impl Mapped for PostRow {
        fn mapping() -> &'static TableMapping {
            static MAPPING: TableMapping = TableMapping {
                table: "posts",
                primary_key: "id",
                columns: &[
                    ColumnMapping {
                        property: "Id",
                        column: "id",
                        nullable: false,
                        auto_increment: true,
                    },
                    ColumnMapping {
                        property: "UserId",
                        column: "user_id",
                        nullable: false,
                        auto_increment: false,
                    },
                ],
                references: &[],
            };
            &MAPPING
        }
    }

    fn aliases(query: &SelectQuery) -> Vec<String> {
        match &query.columns {
            SelectList::Columns(groups) => groups
                .iter()
                .flat_map(|g| g.columns.iter().map(|c| c.alias.clone()))
                .collect(),
            other => panic!("expected resolved columns, got {other:?}"),
        }
    }

    #[test]
    fn select_all_resolves_declared_order() {
        let query = SelectBuilder::new()
            .select_all::<UserRow>()
            .from::<UserRow>()
            .build()
            .unwrap();

        assert_eq!(aliases(&query), vec!["Id", "Email"]);
        assert_eq!(query.from, Some("users"));
    }

    #[test]
    fn select_columns_preserves_given_order() {
        let query = SelectBuilder::new()
            .select_columns::<UserRow>(&[UserRow::EMAIL, UserRow::ID])
            .from::<UserRow>()
            .build()
            .unwrap();

        assert_eq!(aliases(&query), vec!["Email", "Id"]);
    }

    #[test]
    fn unknown_property_fails_at_build() {
        let err = SelectBuilder::new()
            .select_columns::<UserRow>(&[Col("Nope")])
            .from::<UserRow>()
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            QueryError::UnknownProperty {
                table: "users",
                property: "Nope",
            }
        );
    }

    #[test]
    fn unknown_reference_fails_at_build() {
        let err = SelectBuilder::new()
            .select_all_with::<UserRow>(&[Projection::of(Ref("Comments"))])
            .from::<UserRow>()
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            QueryError::UnknownReference {
                table: "users",
                property: "Comments",
            }
        );
    }

    #[test]
    fn reference_expansion_prefixes_aliases() {
        let query = SelectBuilder::new()
            .select_all_with::<UserRow>(&[Projection::of(UserRow::POSTS)])
            .from::<UserRow>()
            .build()
            .unwrap();

        assert_eq!(
            aliases(&query),
            vec!["Id", "Email", "Posts__Id", "Posts__UserId"]
        );
    }

    #[test]
    fn missing_from_is_an_error() {
        let err = SelectBuilder::new()
            .select_all::<UserRow>()
            .build()
            .unwrap_err();
        assert_eq!(err, QueryError::MissingFrom);
    }

    #[test]
    fn second_from_is_an_error() {
        let err = SelectBuilder::new()
            .from::<UserRow>()
            .from::<PostRow>()
            .build()
            .unwrap_err();
        assert_eq!(err, QueryError::DuplicateFrom { table: "users" });
    }

    #[test]
    fn joins_accumulate_in_call_order() {
        let query = SelectBuilder::new()
            .select_all::<UserRow>()
            .from::<UserRow>()
            .inner_join::<PostRow>()
            .on::<UserRow, PostRow>(UserRow::ID, PostRow::USER_ID)
            .build()
            .unwrap();

        assert_eq!(query.joins.len(), 1);
        assert_eq!(query.joins[0].table, "posts");
        assert_eq!(query.joins[0].left.column, "id");
        assert_eq!(query.joins[0].right.column, "user_id");
    }

    #[test]
    fn predicates_keep_call_order_and_values() {
        let query = SelectBuilder::new()
            .select_all::<UserRow>()
            .from::<UserRow>()
            .where_clause::<UserRow>(UserRow::EMAIL.eq("a@b"))
            .where_in::<UserRow>(UserRow::ID, [1, 2])
            .build()
            .unwrap();

        assert_eq!(query.filters.len(), 2);
        assert!(matches!(
            &query.filters[0],
            Filter::Compare {
                op: CmpOp::Eq,
                value: Value::String(_),
                ..
            }
        ));
        assert!(matches!(
            &query.filters[1],
            Filter::In { values, .. } if values.len() == 2
        ));
    }

    #[test]
    fn order_terms_accumulate() {
        let query = SelectBuilder::new()
            .select_all::<UserRow>()
            .from::<UserRow>()
            .order_by::<UserRow>(UserRow::EMAIL)
            .order_by_desc::<UserRow>(UserRow::ID)
            .build()
            .unwrap();

        assert_eq!(query.order_by.len(), 2);
        assert_eq!(query.order_by[0].column.column, "email");
        assert_eq!(query.order_by[0].direction, OrderDir::Asc);
        assert_eq!(query.order_by[1].direction, OrderDir::Desc);
    }
}
