use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::errors::types::TypeError;

mod field;
pub use field::{Field, FieldType};


/// Where a column comes from. The table or alias name is the column's qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SourceDefinition {
    Table {
        name: String,
    },
    Alias {
        name: String,
    },
    #[default]
    Dynamic,
}

impl SourceDefinition {
    pub fn qualifier(&self) -> Option<&str> {
        match self {
            SourceDefinition::Table { name } | SourceDefinition::Alias { name } => Some(name),
            SourceDefinition::Dynamic => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub typ: FieldType,
    pub nullable: bool,
    #[serde(default)]
    pub source: SourceDefinition,
}

impl FieldDefinition {
    pub fn new(name: String, typ: FieldType, nullable: bool, source: SourceDefinition) -> Self {
        Self {
            name,
            typ,
            nullable,
            source,
        }
    }

    /// `qualifier.name`, or just `name` for dynamic columns.
    pub fn qualified_name(&self) -> String {
        match self.source.qualifier() {
            Some(qualifier) => format!("{qualifier}.{}", self.name),
            None => self.name.clone(),
        }
    }

    fn matches(&self, qualifier: Option<&str>, name: &str) -> bool {
        self.name == name
            && match qualifier {
                Some(qualifier) => self.source.qualifier() == Some(qualifier),
                None => true,
            }
    }
}

/// Splits `employees.DepartmentID` into its qualifier and column name.
pub fn split_column_name(column: &str) -> (Option<&str>, &str) {
    match column.split_once('.') {
        Some((qualifier, name)) => (Some(qualifier), name),
        None => (None, column),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// Ordered column definitions. A record carries one value per field, in this order.
    pub fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn field(&mut self, field: FieldDefinition) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolves a qualified (`alias.column`) or unqualified (`column`) name to a field index.
    ///
    /// An unqualified name matching columns from more than one source is rejected
    /// instead of picking one of them.
    pub fn resolve(&self, qualifier: Option<&str>, name: &str) -> Result<usize, TypeError> {
        let mut matches = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.matches(qualifier, name));

        let column = || match qualifier {
            Some(qualifier) => format!("{qualifier}.{name}"),
            None => name.to_string(),
        };

        let Some((index, _)) = matches.next() else {
            return Err(TypeError::UnknownColumn(column()));
        };
        let others: Vec<_> = matches.collect();
        if !others.is_empty() {
            let candidates = std::iter::once(index)
                .chain(others.into_iter().map(|(i, _)| i))
                .map(|i| self.fields[i].qualified_name())
                .collect();
            return Err(TypeError::AmbiguousColumn {
                column: column(),
                candidates,
            });
        }
        Ok(index)
    }

    pub fn get_field_index(&self, column: &str) -> Result<(usize, &FieldDefinition), TypeError> {
        let (qualifier, name) = split_column_name(column);
        let index = self.resolve(qualifier, name)?;
        Ok((index, &self.fields[index]))
    }

    /// The first field whose qualifier and name repeat an earlier field.
    pub fn find_duplicate(&self) -> Option<&FieldDefinition> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        self.fields
            .iter()
            .find(|field| !seen.insert((field.source.qualifier(), field.name.as_str())))
    }

    /// Copy of this schema with every column attributed to `source`.
    pub fn with_source(&self, source: &SourceDefinition) -> Schema {
        Schema {
            fields: self
                .fields
                .iter()
                .map(|field| FieldDefinition {
                    source: source.clone(),
                    ..field.clone()
                })
                .collect(),
        }
    }

    /// Copy of this schema where every column accepts nulls.
    pub fn to_nullable(&self) -> Schema {
        Schema {
            fields: self
                .fields
                .iter()
                .map(|field| FieldDefinition {
                    nullable: true,
                    ..field.clone()
                })
                .collect(),
        }
    }

    /// Left columns followed by right columns.
    pub fn concat(&self, other: &Schema) -> Schema {
        let mut fields = Vec::with_capacity(self.len() + other.len());
        fields.extend_from_slice(&self.fields);
        fields.extend_from_slice(&other.fields);
        Schema { fields }
    }

    pub fn validate_record(&self, record: &Record) -> Result<(), TypeError> {
        if record.values.len() != self.fields.len() {
            return Err(TypeError::RecordWidthMismatch {
                expected: self.fields.len(),
                actual: record.values.len(),
            });
        }
        for (field, value) in self.fields.iter().zip(&record.values) {
            let valid = match value.ty() {
                Some(typ) => typ == field.typ,
                None => field.nullable,
            };
            if !valid {
                return Err(TypeError::InvalidFieldValue {
                    column: field.qualified_name(),
                    field_type: field.typ,
                    nullable: field.nullable,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.fields.iter().map(|f| f.qualified_name()).collect();
        f.write_str(&names.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Record {
    /// List of values, following the definitions of `fields` of the associated schema
    pub values: Vec<Field>,
}

impl Record {
    pub fn new(values: Vec<Field>) -> Record {
        Record { values }
    }

    pub fn nulls(size: usize) -> Record {
        Record {
            values: vec![Field::Null; size],
        }
    }

    pub fn get_value(&self, index: usize) -> Result<&Field, TypeError> {
        self.values
            .get(index)
            .ok_or(TypeError::InvalidFieldIndex(index))
    }

    /// Concatenation of two records, left values first.
    pub fn join(left: &Record, right: &Record) -> Record {
        let mut values = Vec::with_capacity(left.values.len() + right.values.len());
        values.extend_from_slice(&left.values);
        values.extend_from_slice(&right.values);
        Record { values }
    }
}

/// Positional access to a row's values, regardless of how the row is stored.
pub trait FieldAccess {
    fn get_field(&self, index: usize) -> Option<&Field>;
}

impl FieldAccess for Record {
    fn get_field(&self, index: usize) -> Option<&Field> {
        self.values.get(index)
    }
}

/// A left and a right record viewed as one row, without copying either.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRecord<'a> {
    pub left: &'a Record,
    pub right: &'a Record,
}

impl<'a> JoinedRecord<'a> {
    pub fn new(left: &'a Record, right: &'a Record) -> Self {
        Self { left, right }
    }

    pub fn to_record(&self) -> Record {
        Record::join(self.left, self.right)
    }
}

impl FieldAccess for JoinedRecord<'_> {
    fn get_field(&self, index: usize) -> Option<&Field> {
        let left_len = self.left.values.len();
        if index < left_len {
            self.left.values.get(index)
        } else {
            self.right.values.get(index - left_len)
        }
    }
}
