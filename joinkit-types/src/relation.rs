use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::errors::types::TypeError;
use crate::types::{Field, FieldDefinition, FieldType, Record, Schema, SourceDefinition};

/// An ordered, immutable collection of records sharing one schema.
///
/// Every record is checked against the schema on construction, so values of a
/// relation always have their column's type and nulls only appear in nullable columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawRelation")]
pub struct Relation {
    schema: Schema,
    records: Vec<Record>,
}

// Deserialized form, checked by `Relation::new` before use.
#[derive(Deserialize)]
struct RawRelation {
    schema: Schema,
    records: Vec<Record>,
}

impl TryFrom<RawRelation> for Relation {
    type Error = TypeError;

    fn try_from(raw: RawRelation) -> Result<Self, Self::Error> {
        Relation::new(raw.schema, raw.records)
    }
}

impl Relation {
    pub fn new(schema: Schema, records: Vec<Record>) -> Result<Self, TypeError> {
        if let Some(field) = schema.find_duplicate() {
            return Err(TypeError::DuplicateColumn(field.qualified_name()));
        }
        for record in &records {
            schema.validate_record(record)?;
        }
        Ok(Self { schema, records })
    }

    /// A base table whose columns are qualified by `name`.
    pub fn from_table(
        name: &str,
        columns: &[(&str, FieldType, bool)],
        rows: Vec<Vec<Field>>,
    ) -> Result<Self, TypeError> {
        let source = SourceDefinition::Table {
            name: name.to_string(),
        };
        let schema = Schema::new(
            columns
                .iter()
                .map(|(column, typ, nullable)| {
                    FieldDefinition::new(column.to_string(), *typ, *nullable, source.clone())
                })
                .collect(),
        );
        Self::new(schema, rows.into_iter().map(Record::new).collect())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of `column` (`alias.column` or `column`) in the row at `row`.
    pub fn value(&self, row: usize, column: &str) -> Result<&Field, TypeError> {
        let (index, _) = self.schema.get_field_index(column)?;
        let record = self
            .records
            .get(row)
            .ok_or(TypeError::InvalidFieldIndex(row))?;
        record.get_value(index)
    }

    /// All values of `column`, in row order.
    pub fn column(&self, column: &str) -> Result<Vec<&Field>, TypeError> {
        let (index, _) = self.schema.get_field_index(column)?;
        self.records
            .iter()
            .map(|record| record.get_value(index))
            .collect()
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table.set_titles(Row::new(
            self.schema
                .fields
                .iter()
                .map(|field| Cell::new(&field.qualified_name()))
                .collect(),
        ));
        for record in &self.records {
            table.add_row(Row::new(
                record
                    .values
                    .iter()
                    .map(|value| Cell::new(&value.to_string()))
                    .collect(),
            ));
        }
        write!(f, "{table}")
    }
}
