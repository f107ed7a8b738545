#![allow(clippy::enum_variant_names)]

use joinkit_sql_expression::aggregate::AggregateFunctionType;
use joinkit_sql_expression::error::Error as ExpressionError;
use joinkit_types::errors::types::TypeError;
use joinkit_types::thiserror::{self, Error};
use joinkit_types::types::{Field, FieldType};

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Unknown relation: {0}")]
    UnknownRelation(String),
    #[error("Invalid predicate `{predicate}`: {reason}")]
    InvalidPredicate { predicate: String, reason: String },
    #[error("Invalid alias {alias:?}: {reason}")]
    InvalidAlias { alias: String, reason: String },
    #[error("Column {column} appears more than once in the unqualified output")]
    SchemaConflict { column: String },
    #[error("Unsupported join kind: {0}")]
    UnsupportedJoinKind(String),
    #[error("Cross join would produce {rows} rows, more than the limit of {limit}")]
    RowLimitExceeded { limit: u64, rows: u64 },

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("{0}() requires a column")]
    MissingColumn(AggregateFunctionType),
    #[error("Invalid operand type for function: {function}({column}), found {field_type}")]
    InvalidOperandType {
        function: AggregateFunctionType,
        column: String,
        field_type: FieldType,
    },
    #[error("Invalid value {value} for function: {function}()")]
    InvalidValue {
        function: AggregateFunctionType,
        value: Field,
    },
    #[error("Overflow while calculating {0}()")]
    Overflow(AggregateFunctionType),
    #[error("Output column {0} collides with a grouping column")]
    OutputColumnConflict(String),
    #[error(transparent)]
    Type(#[from] TypeError),
}
