pub mod aggregation;
pub mod errors;
pub mod evaluator;
pub mod planner;
pub mod product;
pub mod query;
pub mod source;
mod utils;

pub use evaluator::{evaluate, Evaluator};
pub use joinkit_sql_expression as expression;
pub use product::join::{ColumnNaming, JoinKind, JoinSpec};
pub use query::{AggregationSpec, Query, RelationRef};
pub use source::{MemorySource, RelationSource};

#[cfg(test)]
mod tests;
