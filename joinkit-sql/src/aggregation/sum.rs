use joinkit_sql_expression::aggregate::AggregateFunctionType::Sum;
use joinkit_types::ordered_float::OrderedFloat;
use joinkit_types::types::Field;

use crate::aggregation::aggregator::Aggregator;
use crate::errors::AggregationError;

/// Integer sums stay integers and fail on overflow; float sums stay floats.
#[derive(Debug, Clone, Default)]
pub struct SumAggregator {
    current_state: Option<Field>,
}

impl SumAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for SumAggregator {
    fn insert(&mut self, value: &Field) -> Result<(), AggregationError> {
        let sum = match (&self.current_state, value) {
            (_, Field::Null) => return Ok(()),
            (None, Field::Int(_) | Field::Float(_)) => value.clone(),
            (Some(Field::Int(sum)), Field::Int(value)) => Field::Int(
                sum.checked_add(*value)
                    .ok_or(AggregationError::Overflow(Sum))?,
            ),
            (Some(Field::Float(sum)), Field::Float(value)) => {
                Field::Float(OrderedFloat(sum.0 + value.0))
            }
            _ => {
                return Err(AggregationError::InvalidValue {
                    function: Sum,
                    value: value.clone(),
                })
            }
        };
        self.current_state = Some(sum);
        Ok(())
    }

    fn get_value(&self) -> Field {
        self.current_state.clone().unwrap_or(Field::Null)
    }
}
