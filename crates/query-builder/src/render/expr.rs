use crate::ast::common::{CmpOp, OrderDir, QualCol};
use crate::ast::select::{Filter, OrderByExpr};
use crate::render::{Render, Renderer};

impl Render for QualCol {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&r.dialect.quote_identifier(self.table));
        r.sql.push('.');
        r.sql.push_str(&r.dialect.quote_identifier(self.column));
    }
}

impl Render for Filter {
    fn render(&self, r: &mut Renderer) {
        match self {
            Filter::Compare { column, op, value } => {
                r.sql.push('(');
                column.render(r);
                let op_str = match op {
                    CmpOp::Eq => " = ",
                    CmpOp::NotEq => " <> ",
                };
                r.sql.push_str(op_str);
                r.add_param(value.clone());
                r.sql.push(')');
            }
            Filter::In { column, values } => {
                r.sql.push('(');
                column.render(r);
                r.sql.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        r.sql.push(',');
                    }
                    r.add_param(value.clone());
                }
                r.sql.push_str("))");
            }
        }
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.column.render(r);
        if self.direction == OrderDir::Desc {
            r.sql.push_str(" DESC");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SqlServer;
    use model::core::value::Value;

    const NODE_ID: QualCol = QualCol {
        table: "umbracoNode",
        column: "id",
    };

    #[test]
    fn compare_filter_parenthesizes_and_binds() {
        let filter = Filter::Compare {
            column: NODE_ID,
            op: CmpOp::Eq,
            value: Value::Int(5),
        };
        let mut renderer = Renderer::new(&SqlServer);
        filter.render(&mut renderer);
        let query = renderer.finish();

        assert_eq!(query.sql, "([umbracoNode].[id] = @0)");
        assert_eq!(query.params, vec![Value::Int(5)]);
    }

    #[test]
    fn in_filter_packs_placeholders_without_spaces() {
        let filter = Filter::In {
            column: NODE_ID,
            values: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        };
        let mut renderer = Renderer::new(&SqlServer);
        filter.render(&mut renderer);
        let query = renderer.finish();

        assert_eq!(query.sql, "([umbracoNode].[id] IN (@0,@1,@2))");
        assert_eq!(query.params.len(), 3);
    }
}
