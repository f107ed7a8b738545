use joinkit_types::types::{FieldType, Schema};

use crate::ast::{ColumnRef, Expr};
use crate::error::Error;
use crate::execution::Expression;

/// Resolves caller-supplied [`Expr`] trees into executable [`Expression`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionBuilder;

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Resolves every column of `expr` against `schema` and type-checks the result.
    pub fn build(&self, expr: &Expr, schema: &Schema) -> Result<Expression, Error> {
        let expression = self.resolve(expr, schema)?;
        expression.get_type(schema)?;
        Ok(expression)
    }

    /// Like [`build`](Self::build), and additionally requires a boolean result.
    pub fn build_predicate(&self, expr: &Expr, schema: &Schema) -> Result<Expression, Error> {
        let expression = self.resolve(expr, schema)?;
        let expression_type = expression.get_type(schema)?;
        if expression_type.return_type != FieldType::Boolean {
            return Err(Error::NonBooleanPredicate(expression_type.return_type));
        }
        Ok(expression)
    }

    fn resolve(&self, expr: &Expr, schema: &Schema) -> Result<Expression, Error> {
        match expr {
            Expr::Column(column) => Ok(Expression::Column {
                index: self.resolve_column(column, schema)?,
            }),
            Expr::Literal(value) => Ok(Expression::Literal(value.clone())),
            Expr::UnaryOperator { operator, arg } => Ok(Expression::UnaryOperator {
                operator: *operator,
                arg: Box::new(self.resolve(arg, schema)?),
            }),
            Expr::BinaryOperator {
                left,
                operator,
                right,
            } => Ok(Expression::BinaryOperator {
                left: Box::new(self.resolve(left, schema)?),
                operator: *operator,
                right: Box::new(self.resolve(right, schema)?),
            }),
            Expr::Like {
                arg,
                pattern,
                escape,
                negated,
            } => Ok(Expression::Like {
                arg: Box::new(self.resolve(arg, schema)?),
                pattern: Box::new(self.resolve(pattern, schema)?),
                escape: *escape,
                negated: *negated,
            }),
            Expr::IsNull { arg, negated } => Ok(Expression::IsNull {
                arg: Box::new(self.resolve(arg, schema)?),
                negated: *negated,
            }),
        }
    }

    fn resolve_column(&self, column: &ColumnRef, schema: &Schema) -> Result<usize, Error> {
        Ok(schema.resolve(column.qualifier.as_deref(), &column.name)?)
    }
}
