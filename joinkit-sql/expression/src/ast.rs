//! Predicates as written by the caller: columns are still referenced by name.
//!
//! An [`Expr`] is resolved against a concrete schema by
//! [`ExpressionBuilder`](crate::builder::ExpressionBuilder), which turns names into
//! field indexes and type-checks the tree.

use std::fmt::{Display, Formatter};
use std::ops::Not;

use joinkit_types::serde::{Deserialize, Serialize};
use joinkit_types::types::{split_column_name, Field};

use crate::operator::{BinaryOperatorType, UnaryOperatorType};

/// A column name, optionally qualified by a table or alias (`e.manager_id`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(qualifier: Option<&str>, name: &str) -> Self {
        Self {
            qualifier: qualifier.map(str::to_string),
            name: name.to_string(),
        }
    }

    pub fn parse(column: &str) -> Self {
        let (qualifier, name) = split_column_name(column);
        Self::new(qualifier, name)
    }
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum Expr {
    Column(ColumnRef),
    Literal(Field),
    UnaryOperator {
        operator: UnaryOperatorType,
        arg: Box<Expr>,
    },
    BinaryOperator {
        left: Box<Expr>,
        operator: BinaryOperatorType,
        right: Box<Expr>,
    },
    Like {
        arg: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<char>,
        negated: bool,
    },
    IsNull {
        arg: Box<Expr>,
        negated: bool,
    },
}

/// Column reference, `"alias.column"` or `"column"`.
pub fn col(column: &str) -> Expr {
    Expr::Column(ColumnRef::parse(column))
}

pub fn lit(value: impl Into<Field>) -> Expr {
    Expr::Literal(value.into())
}

impl Expr {
    fn binary(self, operator: BinaryOperatorType, right: Expr) -> Expr {
        Expr::BinaryOperator {
            left: Box::new(self),
            operator,
            right: Box::new(right),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Eq, right)
    }

    pub fn not_eq(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Ne, right)
    }

    pub fn gt(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Gt, right)
    }

    pub fn gt_eq(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Gte, right)
    }

    pub fn lt(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Lt, right)
    }

    pub fn lt_eq(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Lte, right)
    }

    pub fn and(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::And, right)
    }

    pub fn or(self, right: Expr) -> Expr {
        self.binary(BinaryOperatorType::Or, right)
    }

    pub fn like(self, pattern: Expr) -> Expr {
        Expr::Like {
            arg: Box::new(self),
            pattern: Box::new(pattern),
            escape: None,
            negated: false,
        }
    }

    pub fn not_like(self, pattern: Expr) -> Expr {
        Expr::Like {
            arg: Box::new(self),
            pattern: Box::new(pattern),
            escape: None,
            negated: true,
        }
    }

    pub fn is_null(self) -> Expr {
        Expr::IsNull {
            arg: Box::new(self),
            negated: false,
        }
    }

    pub fn is_not_null(self) -> Expr {
        Expr::IsNull {
            arg: Box::new(self),
            negated: true,
        }
    }

    /// Every column the expression references, in order of appearance.
    pub fn columns(&self) -> Vec<&ColumnRef> {
        let mut columns = vec![];
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, columns: &mut Vec<&'a ColumnRef>) {
        match self {
            Expr::Column(column) => columns.push(column),
            Expr::Literal(_) => {}
            Expr::UnaryOperator { arg, .. } | Expr::IsNull { arg, .. } => {
                arg.collect_columns(columns)
            }
            Expr::BinaryOperator { left, right, .. } => {
                left.collect_columns(columns);
                right.collect_columns(columns);
            }
            Expr::Like { arg, pattern, .. } => {
                arg.collect_columns(columns);
                pattern.collect_columns(columns);
            }
        }
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::UnaryOperator {
            operator: UnaryOperatorType::Not,
            arg: Box::new(self),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Column(column) => write!(f, "{column}"),
            Expr::Literal(Field::String(value)) => write!(f, "'{value}'"),
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::UnaryOperator { operator, arg } => write!(f, "{operator}({arg})"),
            Expr::BinaryOperator {
                left,
                operator,
                right,
            } if operator.is_logical() => write!(f, "({left}){operator}({right})"),
            Expr::BinaryOperator {
                left,
                operator,
                right,
            } => write!(f, "{left}{operator}{right}"),
            Expr::Like {
                arg,
                pattern,
                escape,
                negated,
            } => {
                write!(f, "{arg}")?;
                f.write_str(if *negated { " NOT LIKE " } else { " LIKE " })?;
                write!(f, "{pattern}")?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE '{escape}'")?;
                }
                Ok(())
            }
            Expr::IsNull { arg, negated } => {
                write!(f, "{arg}")?;
                f.write_str(if *negated { " IS NOT NULL" } else { " IS NULL" })
            }
        }
    }
}
