use joinkit_types::types::Field;

use crate::aggregation::aggregator::Aggregator;
use crate::errors::AggregationError;

#[derive(Debug, Clone, Default)]
pub struct MinAggregator {
    current_state: Option<Field>,
}

impl MinAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for MinAggregator {
    fn insert(&mut self, value: &Field) -> Result<(), AggregationError> {
        if value.is_null() {
            return Ok(());
        }
        let replace = match &self.current_state {
            Some(current) => value < current,
            None => true,
        };
        if replace {
            self.current_state = Some(value.clone());
        }
        Ok(())
    }

    fn get_value(&self) -> Field {
        self.current_state.clone().unwrap_or(Field::Null)
    }
}
