use joinkit_sql_expression::aggregate::AggregateFunctionType::Avg;
use joinkit_types::ordered_float::OrderedFloat;
use joinkit_types::types::Field;

use crate::aggregation::aggregator::Aggregator;
use crate::errors::AggregationError;

#[derive(Debug, Clone, Default)]
pub struct AvgAggregator {
    sum: f64,
    count: u64,
}

impl AvgAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for AvgAggregator {
    fn insert(&mut self, value: &Field) -> Result<(), AggregationError> {
        if value.is_null() {
            return Ok(());
        }
        let value = value.to_float().ok_or_else(|| AggregationError::InvalidValue {
            function: Avg,
            value: value.clone(),
        })?;
        self.sum += value;
        self.count += 1;
        Ok(())
    }

    fn get_value(&self) -> Field {
        if self.count == 0 {
            Field::Null
        } else {
            Field::Float(OrderedFloat(self.sum / self.count as f64))
        }
    }
}
