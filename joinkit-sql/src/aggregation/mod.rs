use ahash::RandomState;
use joinkit_sql_expression::aggregate::AggregateFunctionType;
use joinkit_types::errors::types::TypeError;
use joinkit_types::indexmap::IndexMap;
use joinkit_types::relation::Relation;
use joinkit_types::types::{
    Field, FieldDefinition, FieldType, Record, Schema, SourceDefinition,
};

use crate::errors::AggregationError;
use crate::utils::record_hashtable_key::get_record_key_fields;

use self::aggregator::{get_aggregator, Aggregator, AggregatorEnum};

pub mod aggregator;
mod avg;
mod count;
mod max;
mod min;
mod sum;


/// One aggregate function grouped by zero or more columns, resolved against an input schema.
///
/// Groups are emitted in the order their key first appears in the input. Null key
/// values are grouped together like any other value.
#[derive(Debug, Clone)]
pub struct Aggregation {
    function: AggregateFunctionType,
    group_by: Vec<usize>,
    column: Option<usize>,
    output_schema: Schema,
}

impl Aggregation {
    pub fn new(
        input_schema: &Schema,
        group_by: &[String],
        function: AggregateFunctionType,
        column: Option<&str>,
        output: &str,
    ) -> Result<Self, AggregationError> {
        let mut output_schema = Schema::empty();
        let mut group_indexes = Vec::with_capacity(group_by.len());
        for group_column in group_by {
            let (index, field) = input_schema.get_field_index(group_column)?;
            group_indexes.push(index);
            output_schema.field(field.clone());
        }
        if let Some(field) = output_schema.find_duplicate() {
            return Err(TypeError::DuplicateColumn(field.qualified_name()).into());
        }

        let (column_index, return_type) = match column {
            Some(column) => {
                let (index, field) = input_schema.get_field_index(column)?;
                (Some(index), get_return_type(function, column, field)?)
            }
            None if function == AggregateFunctionType::Count => (None, FieldType::Int),
            None => return Err(AggregationError::MissingColumn(function)),
        };

        if output_schema.fields.iter().any(|field| field.name == output) {
            return Err(AggregationError::OutputColumnConflict(output.to_string()));
        }
        output_schema.field(FieldDefinition::new(
            output.to_string(),
            return_type,
            function != AggregateFunctionType::Count,
            SourceDefinition::Dynamic,
        ));

        Ok(Self {
            function,
            group_by: group_indexes,
            column: column_index,
            output_schema,
        })
    }

    pub fn function(&self) -> AggregateFunctionType {
        self.function
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    pub fn execute(&self, records: &[Record]) -> Result<Vec<Record>, AggregationError> {
        let mut groups: IndexMap<Vec<Field>, AggregatorEnum, RandomState> = IndexMap::default();
        let no_value = Field::Null;

        for record in records {
            let key = get_record_key_fields(record, &self.group_by);
            let value = match self.column {
                Some(index) => record.get_value(index)?,
                None => &no_value,
            };
            groups
                .entry(key)
                .or_insert_with(|| self.new_aggregator())
                .insert(value)?;
        }

        // Without grouping columns there is always exactly one group.
        if groups.is_empty() && self.group_by.is_empty() {
            groups.insert(vec![], self.new_aggregator());
        }

        Ok(groups
            .into_iter()
            .map(|(mut values, aggregator)| {
                values.push(aggregator.get_value());
                Record::new(values)
            })
            .collect())
    }

    pub fn apply(&self, relation: &Relation) -> Result<Relation, AggregationError> {
        let records = self.execute(relation.records())?;
        Ok(Relation::new(self.output_schema.clone(), records)?)
    }

    fn new_aggregator(&self) -> AggregatorEnum {
        get_aggregator(self.function, self.column.is_none())
    }
}

fn get_return_type(
    function: AggregateFunctionType,
    column: &str,
    field: &FieldDefinition,
) -> Result<FieldType, AggregationError> {
    match function {
        AggregateFunctionType::Count => Ok(FieldType::Int),
        AggregateFunctionType::Sum if field.typ.is_numeric() => Ok(field.typ),
        AggregateFunctionType::Avg if field.typ.is_numeric() => Ok(FieldType::Float),
        AggregateFunctionType::Min | AggregateFunctionType::Max => Ok(field.typ),
        AggregateFunctionType::Sum | AggregateFunctionType::Avg => {
            Err(AggregationError::InvalidOperandType {
                function,
                column: column.to_string(),
                field_type: field.typ,
            })
        }
    }
}
