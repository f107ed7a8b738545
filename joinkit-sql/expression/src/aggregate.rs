use std::fmt::{Display, Formatter};

use joinkit_types::serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum AggregateFunctionType {
    Avg,
    Count,
    Max,
    Min,
    Sum,
}

impl AggregateFunctionType {
    pub fn new(name: &str) -> Result<AggregateFunctionType, Error> {
        Ok(match name.to_lowercase().as_str() {
            "avg" => AggregateFunctionType::Avg,
            "count" => AggregateFunctionType::Count,
            "max" => AggregateFunctionType::Max,
            "min" => AggregateFunctionType::Min,
            "sum" => AggregateFunctionType::Sum,
            _ => return Err(Error::UnsupportedAggregateFunction(name.to_string())),
        })
    }
}

impl Display for AggregateFunctionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateFunctionType::Avg => f.write_str("AVG"),
            AggregateFunctionType::Count => f.write_str("COUNT"),
            AggregateFunctionType::Max => f.write_str("MAX"),
            AggregateFunctionType::Min => f.write_str("MIN"),
            AggregateFunctionType::Sum => f.write_str("SUM"),
        }
    }
}
