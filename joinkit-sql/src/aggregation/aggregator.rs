#![allow(clippy::enum_variant_names)]

use enum_dispatch::enum_dispatch;
use joinkit_sql_expression::aggregate::AggregateFunctionType;
use joinkit_types::types::Field;

use crate::aggregation::avg::AvgAggregator;
use crate::aggregation::count::CountAggregator;
use crate::aggregation::max::MaxAggregator;
use crate::aggregation::min::MinAggregator;
use crate::aggregation::sum::SumAggregator;
use crate::errors::AggregationError;

/// Running state of one aggregate over one group.
#[enum_dispatch]
pub trait Aggregator {
    fn insert(&mut self, value: &Field) -> Result<(), AggregationError>;
    /// `Null` when no non-null value was seen, except for `COUNT`.
    fn get_value(&self) -> Field;
}

#[enum_dispatch(Aggregator)]
#[derive(Debug, Clone)]
pub enum AggregatorEnum {
    AvgAggregator,
    CountAggregator,
    MaxAggregator,
    MinAggregator,
    SumAggregator,
}

/// `count_rows` selects `COUNT(*)`, which also counts nulls.
pub fn get_aggregator(function: AggregateFunctionType, count_rows: bool) -> AggregatorEnum {
    match function {
        AggregateFunctionType::Avg => AvgAggregator::new().into(),
        AggregateFunctionType::Count if count_rows => CountAggregator::rows().into(),
        AggregateFunctionType::Count => CountAggregator::values().into(),
        AggregateFunctionType::Max => MaxAggregator::new().into(),
        AggregateFunctionType::Min => MinAggregator::new().into(),
        AggregateFunctionType::Sum => SumAggregator::new().into(),
    }
}
