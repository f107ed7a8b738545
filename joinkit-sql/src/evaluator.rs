use std::borrow::Cow;
use std::time::Instant;

use joinkit_types::models::config::EvaluatorOptions;
use joinkit_types::relation::Relation;
use joinkit_types::tracing::{debug, trace};
use joinkit_types::types::Record;

use crate::errors::JoinError;
use crate::planner::{AggregationPlan, JoinPlan, PlannedInput, Planner};
use crate::product::join::operator::JoinType;
use crate::product::join::{JoinResult, JoinSpec};
use crate::query::{AggregationSpec, Query};
use crate::source::RelationSource;

/// Evaluates joins and aggregations over the relations of a [`RelationSource`].
///
/// Inputs are never modified; every call plans the whole query first and then
/// materialises it bottom-up into a new [`Relation`].
pub struct Evaluator<'a, S: RelationSource + ?Sized> {
    source: &'a S,
    options: EvaluatorOptions,
}

impl<'a, S: RelationSource + ?Sized> Evaluator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::with_options(source, EvaluatorOptions::default())
    }

    pub fn with_options(source: &'a S, options: EvaluatorOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    pub fn evaluate(&self, spec: &JoinSpec) -> JoinResult<Relation> {
        let plan = self.planner().plan_join(spec)?;
        let records = self.execute_join(&plan)?;
        Ok(Relation::new(plan.output_schema().clone(), records)?)
    }

    pub fn aggregate(&self, spec: &AggregationSpec) -> JoinResult<Relation> {
        let plan = self.planner().plan_aggregation(spec)?;
        let records = self.execute_aggregation(&plan)?;
        Ok(Relation::new(plan.output_schema().clone(), records)?)
    }

    pub fn evaluate_query(&self, query: &Query) -> JoinResult<Relation> {
        let input = self.planner().plan_query(query)?;
        let records = self.execute(&input)?.into_owned();
        Ok(Relation::new(input.schema().clone(), records)?)
    }

    fn planner(&self) -> Planner<'a, S> {
        Planner::new(self.source, self.options.join_strategy)
    }

    fn execute(&self, input: &PlannedInput<'a>) -> JoinResult<Cow<'a, [Record]>> {
        match input {
            PlannedInput::Table { relation, .. } => Ok(Cow::Borrowed(relation.records())),
            PlannedInput::Join(plan) => Ok(Cow::Owned(self.execute_join(plan)?)),
            PlannedInput::Aggregate(plan) => Ok(Cow::Owned(self.execute_aggregation(plan)?)),
        }
    }

    fn execute_join(&self, plan: &JoinPlan<'a>) -> JoinResult<Vec<Record>> {
        let left = self.execute(&plan.left)?;
        let right = self.execute(&plan.right)?;

        if plan.operator.join_type() == JoinType::Cross {
            if let Some(limit) = self.options.cross_join_row_limit {
                let rows = (left.len() as u64).saturating_mul(right.len() as u64);
                if rows > limit {
                    return Err(JoinError::RowLimitExceeded { limit, rows });
                }
            }
        }

        let start = Instant::now();
        let records = plan.operator.execute(&left, &right)?;
        debug!(
            "{} produced {} rows from {} left and {} right rows",
            plan.description,
            records.len(),
            left.len(),
            right.len()
        );
        trace!("{} executed in {:?}", plan.description, start.elapsed());
        Ok(records)
    }

    fn execute_aggregation(&self, plan: &AggregationPlan<'a>) -> JoinResult<Vec<Record>> {
        let input = self.execute(&plan.input)?;

        let start = Instant::now();
        let records = plan.aggregation.execute(&input)?;
        debug!(
            "{}() produced {} groups from {} rows",
            plan.aggregation.function(),
            records.len(),
            input.len()
        );
        trace!(
            "{}() executed in {:?}",
            plan.aggregation.function(),
            start.elapsed()
        );
        Ok(records)
    }
}

/// Evaluates `spec` with default options.
pub fn evaluate<S: RelationSource + ?Sized>(source: &S, spec: &JoinSpec) -> JoinResult<Relation> {
    Evaluator::new(source).evaluate(spec)
}
