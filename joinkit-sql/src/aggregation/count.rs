use joinkit_sql_expression::aggregate::AggregateFunctionType::Count;
use joinkit_types::types::Field;

use crate::aggregation::aggregator::Aggregator;
use crate::errors::AggregationError;

#[derive(Debug, Clone)]
pub struct CountAggregator {
    current_state: i64,
    count_nulls: bool,
}

impl CountAggregator {
    /// `COUNT(*)`
    pub fn rows() -> Self {
        Self {
            current_state: 0,
            count_nulls: true,
        }
    }

    /// `COUNT(column)`
    pub fn values() -> Self {
        Self {
            current_state: 0,
            count_nulls: false,
        }
    }
}

impl Aggregator for CountAggregator {
    fn insert(&mut self, value: &Field) -> Result<(), AggregationError> {
        if self.count_nulls || !value.is_null() {
            self.current_state = self
                .current_state
                .checked_add(1)
                .ok_or(AggregationError::Overflow(Count))?;
        }
        Ok(())
    }

    fn get_value(&self) -> Field {
        Field::Int(self.current_state)
    }
}
