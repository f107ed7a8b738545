use std::fmt::{Display, Formatter};

use joinkit_types::serde::{Deserialize, Serialize};
use joinkit_types::types::{Field, FieldAccess};

use crate::comparison::{
    evaluate_eq, evaluate_gt, evaluate_gte, evaluate_lt, evaluate_lte, evaluate_ne,
};
use crate::error::Error;
use crate::execution::Expression;
use crate::logical::{evaluate_and, evaluate_not, evaluate_or};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum UnaryOperatorType {
    Not,
}

impl UnaryOperatorType {
    pub fn evaluate<R: FieldAccess + ?Sized>(
        &self,
        value: &Expression,
        record: &R,
    ) -> Result<Field, Error> {
        match self {
            UnaryOperatorType::Not => evaluate_not(value, record),
        }
    }
}

impl Display for UnaryOperatorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperatorType::Not => f.write_str("NOT "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum BinaryOperatorType {
    // Comparison
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,

    // Logical
    And,
    Or,
}

impl BinaryOperatorType {
    pub fn evaluate<R: FieldAccess + ?Sized>(
        &self,
        left: &Expression,
        right: &Expression,
        record: &R,
    ) -> Result<Field, Error> {
        match self {
            BinaryOperatorType::Eq => evaluate_eq(left, right, record),
            BinaryOperatorType::Ne => evaluate_ne(left, right, record),
            BinaryOperatorType::Gt => evaluate_gt(left, right, record),
            BinaryOperatorType::Gte => evaluate_gte(left, right, record),
            BinaryOperatorType::Lt => evaluate_lt(left, right, record),
            BinaryOperatorType::Lte => evaluate_lte(left, right, record),

            BinaryOperatorType::And => evaluate_and(left, right, record),
            BinaryOperatorType::Or => evaluate_or(left, right, record),
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperatorType::And | BinaryOperatorType::Or)
    }
}

impl Display for BinaryOperatorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BinaryOperatorType::Eq => " = ",
            BinaryOperatorType::Ne => " != ",
            BinaryOperatorType::Gt => " > ",
            BinaryOperatorType::Gte => " >= ",
            BinaryOperatorType::Lt => " < ",
            BinaryOperatorType::Lte => " <= ",
            BinaryOperatorType::And => " AND ",
            BinaryOperatorType::Or => " OR ",
        })
    }
}
