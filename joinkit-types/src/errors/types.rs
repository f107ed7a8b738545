use thiserror::Error;

use crate::types::FieldType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Invalid field index: {0}")]
    InvalidFieldIndex(usize),
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Ambiguous column: {column}, candidates: {}", .candidates.join(", "))]
    AmbiguousColumn {
        column: String,
        candidates: Vec<String>,
    },
    #[error("Invalid field value: {value}, column: {column}, field type: {field_type}, nullable: {nullable}")]
    InvalidFieldValue {
        column: String,
        field_type: FieldType,
        nullable: bool,
        value: String,
    },
    #[error("Column {0} is defined more than once")]
    DuplicateColumn(String),
    #[error("Record has {actual} values but the schema has {expected} fields")]
    RecordWidthMismatch { expected: usize, actual: usize },
}
