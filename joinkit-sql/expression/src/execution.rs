use joinkit_types::errors::types::TypeError;
use joinkit_types::types::{Field, FieldAccess, FieldType, Schema};

use crate::error::Error;
use crate::operator::{BinaryOperatorType, UnaryOperatorType};
use crate::string::{evaluate_is_null, evaluate_like};

/// A predicate resolved against a schema: columns are field indexes.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Column {
        index: usize,
    },
    Literal(Field),
    UnaryOperator {
        operator: UnaryOperatorType,
        arg: Box<Expression>,
    },
    BinaryOperator {
        left: Box<Expression>,
        operator: BinaryOperatorType,
        right: Box<Expression>,
    },
    Like {
        arg: Box<Expression>,
        pattern: Box<Expression>,
        escape: Option<char>,
        negated: bool,
    },
    IsNull {
        arg: Box<Expression>,
        negated: bool,
    },
}

impl Expression {
    pub fn to_string(&self, schema: &Schema) -> String {
        match &self {
            Expression::Column { index } => schema
                .fields
                .get(*index)
                .map_or_else(|| format!("#{index}"), |field| field.qualified_name()),
            Expression::Literal(Field::String(value)) => format!("'{value}'"),
            Expression::Literal(value) => format!("{}", value),
            Expression::UnaryOperator { operator, arg } => {
                operator.to_string() + "(" + arg.to_string(schema).as_str() + ")"
            }
            Expression::BinaryOperator {
                left,
                operator,
                right,
            } => {
                left.to_string(schema)
                    + operator.to_string().as_str()
                    + right.to_string(schema).as_str()
            }
            Expression::Like {
                arg,
                pattern,
                escape: _,
                negated,
            } => {
                arg.to_string(schema)
                    + if *negated { " NOT LIKE " } else { " LIKE " }
                    + pattern.to_string(schema).as_str()
            }
            Expression::IsNull { arg, negated } => {
                arg.to_string(schema) + if *negated { " IS NOT NULL" } else { " IS NULL" }
            }
        }
    }
}

pub struct ExpressionType {
    pub return_type: FieldType,
    pub nullable: bool,
}

impl ExpressionType {
    pub fn new(return_type: FieldType, nullable: bool) -> Self {
        Self {
            return_type,
            nullable,
        }
    }
}

impl Expression {
    pub fn evaluate<R: FieldAccess + ?Sized>(&self, record: &R) -> Result<Field, Error> {
        match self {
            Expression::Literal(field) => Ok(field.clone()),
            Expression::Column { index } => record
                .get_field(*index)
                .cloned()
                .ok_or(Error::Type(TypeError::InvalidFieldIndex(*index))),
            Expression::BinaryOperator {
                left,
                operator,
                right,
            } => operator.evaluate(left, right, record),
            Expression::UnaryOperator { operator, arg } => operator.evaluate(arg, record),
            Expression::Like {
                arg,
                pattern,
                escape,
                negated,
            } => evaluate_like(arg, pattern, *escape, *negated, record),
            Expression::IsNull { arg, negated } => evaluate_is_null(arg, *negated, record),
        }
    }

    /// `true` only when the expression evaluates to boolean true. Null and false both reject.
    pub fn matches<R: FieldAccess + ?Sized>(&self, record: &R) -> Result<bool, Error> {
        Ok(self.evaluate(record)? == Field::Boolean(true))
    }

    pub fn get_type(&self, schema: &Schema) -> Result<ExpressionType, Error> {
        match self {
            Expression::Literal(field) => match field.ty() {
                Some(f) => Ok(ExpressionType::new(f, false)),
                None => Err(Error::LiteralExpressionIsNull),
            },
            Expression::Column { index } => {
                let t = schema
                    .fields
                    .get(*index)
                    .ok_or(Error::Type(TypeError::InvalidFieldIndex(*index)))?;
                Ok(ExpressionType::new(t.typ, t.nullable))
            }
            Expression::UnaryOperator { operator, arg } => {
                get_unary_operator_type(operator, arg, schema)
            }
            Expression::BinaryOperator {
                left,
                operator,
                right,
            } => get_binary_operator_type(left, operator, right, schema),
            Expression::Like { arg, pattern, .. } => get_like_operator_type(arg, pattern, schema),
            Expression::IsNull { arg, .. } => {
                arg.get_type(schema)?;
                Ok(ExpressionType::new(FieldType::Boolean, false))
            }
        }
    }
}

fn get_unary_operator_type(
    operator: &UnaryOperatorType,
    expression: &Expression,
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    let field_type = expression.get_type(schema)?;
    match operator {
        UnaryOperatorType::Not => match field_type.return_type {
            FieldType::Boolean => Ok(field_type),
            field_type => Err(Error::CannotApplyNotTo(field_type)),
        },
    }
}

fn get_binary_operator_type(
    left: &Expression,
    operator: &BinaryOperatorType,
    right: &Expression,
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    let left_field_type = left.get_type(schema)?;
    let right_field_type = right.get_type(schema)?;
    let nullable = left_field_type.nullable || right_field_type.nullable;

    let compatible = match operator {
        BinaryOperatorType::Eq
        | BinaryOperatorType::Ne
        | BinaryOperatorType::Gt
        | BinaryOperatorType::Gte
        | BinaryOperatorType::Lt
        | BinaryOperatorType::Lte => {
            left_field_type.return_type == right_field_type.return_type
                || (left_field_type.return_type.is_numeric()
                    && right_field_type.return_type.is_numeric())
        }
        BinaryOperatorType::And | BinaryOperatorType::Or => {
            left_field_type.return_type == FieldType::Boolean
                && right_field_type.return_type == FieldType::Boolean
        }
    };

    if compatible {
        Ok(ExpressionType::new(FieldType::Boolean, nullable))
    } else {
        Err(Error::CannotApplyBinaryOperator {
            operator: *operator,
            left_field_type: left_field_type.return_type,
            right_field_type: right_field_type.return_type,
        })
    }
}

fn get_like_operator_type(
    arg: &Expression,
    pattern: &Expression,
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    let arg_type = arg.get_type(schema)?;
    let pattern_type = pattern.get_type(schema)?;
    match (arg_type.return_type, pattern_type.return_type) {
        (FieldType::String, FieldType::String) => Ok(ExpressionType::new(
            FieldType::Boolean,
            arg_type.nullable || pattern_type.nullable,
        )),
        (arg_field_type, pattern_field_type) => Err(Error::CannotApplyLike {
            arg_field_type,
            pattern_field_type,
        }),
    }
}
