use joinkit_types::{
    errors::types::TypeError,
    thiserror::{self, Error},
    types::{Field, FieldType},
};

use crate::operator::BinaryOperatorType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Ambiguous column: {column}, candidates: {}", .candidates.join(", "))]
    AmbiguousColumn {
        column: String,
        candidates: Vec<String>,
    },
    #[error("literal expression cannot be null")]
    LiteralExpressionIsNull,
    #[error("cannot apply NOT to {0:?}")]
    CannotApplyNotTo(FieldType),
    #[error("cannot apply {operator:?} to {left_field_type:?} and {right_field_type:?}")]
    CannotApplyBinaryOperator {
        operator: BinaryOperatorType,
        left_field_type: FieldType,
        right_field_type: FieldType,
    },
    #[error("cannot apply LIKE to {arg_field_type:?} with pattern {pattern_field_type:?}")]
    CannotApplyLike {
        arg_field_type: FieldType,
        pattern_field_type: FieldType,
    },
    #[error("predicate must be boolean, found {0:?}")]
    NonBooleanPredicate(FieldType),
    #[error("Unsupported aggregate function: {0}")]
    UnsupportedAggregateFunction(String),

    #[error("Invalid like escape: {0}")]
    InvalidLikeEscape(#[from] like::InvalidEscapeError),
    #[error("Invalid like pattern: {0}")]
    InvalidLikePattern(#[from] like::InvalidPatternError),

    #[error(transparent)]
    Type(TypeError),

    #[error("Invalid types on {0} and {1} for {2} operand")]
    InvalidTypeComparison(Field, Field, String),
    #[error("Unable to cast {0} to {1}")]
    UnableToCast(String, String),
    #[error("Invalid types on {0} for {1} operand")]
    InvalidType(Field, String),
}

impl From<TypeError> for Error {
    fn from(error: TypeError) -> Self {
        match error {
            TypeError::UnknownColumn(column) => Error::UnknownColumn(column),
            TypeError::AmbiguousColumn { column, candidates } => {
                Error::AmbiguousColumn { column, candidates }
            }
            error => Error::Type(error),
        }
    }
}
