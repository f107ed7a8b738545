//! Resolves a [`JoinSpec`] tree into an executable plan.
//!
//! Every relation reference, alias, predicate and intermediate schema is checked here,
//! so a query that fails does so before any row of any input is read.

use std::collections::HashSet;

use joinkit_sql_expression::builder::ExpressionBuilder;
use joinkit_sql_expression::execution::Expression;
use joinkit_sql_expression::operator::BinaryOperatorType;
use joinkit_types::models::config::JoinStrategy;
use joinkit_types::relation::Relation;
use joinkit_types::tracing::debug;
use joinkit_types::types::{Schema, SourceDefinition};

use crate::aggregation::Aggregation;
use crate::errors::JoinError;
use crate::product::join::operator::{EquiKeys, JoinOperator, JoinType};
use crate::product::join::{ColumnNaming, JoinKind, JoinResult, JoinSpec};
use crate::query::{AggregationSpec, Query, RelationRef};
use crate::source::RelationSource;


/// An input whose schema is resolved but whose rows are not produced yet.
#[derive(Debug)]
pub enum PlannedInput<'a> {
    /// A relation from the source. Its columns are qualified by the name it was requested by.
    Table {
        relation: &'a Relation,
        schema: Schema,
    },
    Join(Box<JoinPlan<'a>>),
    Aggregate(Box<AggregationPlan<'a>>),
}

impl PlannedInput<'_> {
    pub fn schema(&self) -> &Schema {
        match self {
            PlannedInput::Table { schema, .. } => schema,
            PlannedInput::Join(plan) => plan.output_schema(),
            PlannedInput::Aggregate(plan) => plan.output_schema(),
        }
    }
}

#[derive(Debug)]
pub struct JoinPlan<'a> {
    pub(crate) description: String,
    pub(crate) left: PlannedInput<'a>,
    pub(crate) right: PlannedInput<'a>,
    pub(crate) operator: JoinOperator,
    output_schema: Schema,
}

impl JoinPlan<'_> {
    pub fn operator(&self) -> &JoinOperator {
        &self.operator
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }
}

#[derive(Debug)]
pub struct AggregationPlan<'a> {
    pub(crate) input: PlannedInput<'a>,
    pub(crate) aggregation: Aggregation,
}

impl AggregationPlan<'_> {
    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    pub fn output_schema(&self) -> &Schema {
        self.aggregation.output_schema()
    }
}

pub struct Planner<'a, S: RelationSource + ?Sized> {
    source: &'a S,
    join_strategy: JoinStrategy,
}

impl<'a, S: RelationSource + ?Sized> Planner<'a, S> {
    pub fn new(source: &'a S, join_strategy: JoinStrategy) -> Self {
        Self {
            source,
            join_strategy,
        }
    }

    pub fn plan_query(&self, query: &Query) -> JoinResult<PlannedInput<'a>> {
        match query {
            Query::Join(spec) => Ok(PlannedInput::Join(Box::new(self.plan_join(spec)?))),
            Query::Aggregate(spec) => Ok(PlannedInput::Aggregate(Box::new(
                self.plan_aggregation(spec)?,
            ))),
        }
    }

    pub fn plan_join(&self, spec: &JoinSpec) -> JoinResult<JoinPlan<'a>> {
        let join_type = spec.kind.join_type()?;
        if matches!(spec.kind, JoinKind::Subquery(_))
            && spec.left.name().is_some()
            && spec.right.name().is_some()
        {
            return Err(JoinError::UnsupportedJoinKind(format!(
                "{} without a subquery input",
                spec.kind
            )));
        }
        let left = self.plan_input(&spec.left)?;
        let right = self.plan_input(&spec.right)?;

        let (left_source, right_source) = get_side_sources(spec)?;
        let left_schema = requalify(left.schema(), left_source);
        let right_schema = requalify(right.schema(), right_source);
        let input_schema = left_schema.concat(&right_schema);
        validate_distinct_columns(&input_schema)?;

        let predicate = build_predicate(spec, join_type, &input_schema)?;
        let equi_keys = match (&predicate, self.join_strategy) {
            (Some(predicate), JoinStrategy::Hash) => {
                get_equi_keys(predicate, &input_schema, left_schema.len())
            }
            _ => None,
        };

        let output_schema = get_output_schema(join_type, spec.naming, &left_schema, &right_schema)?;
        let operator = JoinOperator::new(
            join_type,
            predicate,
            equi_keys,
            (left_schema.len(), right_schema.len()),
        );

        debug!(
            "Planned {} join: {} + {} columns, hash join: {}",
            spec.kind,
            left_schema.len(),
            right_schema.len(),
            operator.is_hash_join()
        );

        Ok(JoinPlan {
            description: format!("{} join", spec.kind),
            left,
            right,
            operator,
            output_schema,
        })
    }

    pub fn plan_aggregation(&self, spec: &AggregationSpec) -> JoinResult<AggregationPlan<'a>> {
        let input = self.plan_input(&spec.input)?;
        let aggregation = Aggregation::new(
            input.schema(),
            &spec.group_by,
            spec.function,
            spec.column.as_deref(),
            &spec.output,
        )?;

        debug!(
            "Planned {}({}) grouped by {} columns",
            spec.function,
            spec.column.as_deref().unwrap_or("*"),
            spec.group_by.len()
        );

        Ok(AggregationPlan { input, aggregation })
    }

    fn plan_input(&self, relation: &RelationRef) -> JoinResult<PlannedInput<'a>> {
        match relation {
            RelationRef::Named(name) => {
                let relation = self
                    .source
                    .relation(name)
                    .ok_or_else(|| JoinError::UnknownRelation(name.clone()))?;
                let schema = relation
                    .schema()
                    .with_source(&SourceDefinition::Table { name: name.clone() });
                Ok(PlannedInput::Table { relation, schema })
            }
            RelationRef::Subquery(query) => self.plan_query(query),
        }
    }
}

/// The source every column of each side is re-attributed to, if any.
fn get_side_sources(
    spec: &JoinSpec,
) -> JoinResult<(Option<SourceDefinition>, Option<SourceDefinition>)> {
    for alias in [&spec.left_alias, &spec.right_alias].into_iter().flatten() {
        validate_alias(alias)?;
    }

    if spec.kind.is_self_join() {
        let (Some(left_alias), Some(right_alias)) = (&spec.left_alias, &spec.right_alias) else {
            return Err(JoinError::InvalidAlias {
                alias: spec
                    .left_alias
                    .clone()
                    .or_else(|| spec.right_alias.clone())
                    .unwrap_or_default(),
                reason: "a self join needs an alias on both sides".to_string(),
            });
        };
        if spec.left != spec.right {
            return Err(JoinError::InvalidAlias {
                alias: format!("{left_alias}, {right_alias}"),
                reason: format!(
                    "a self join reads one relation, found {} and {}",
                    spec.left, spec.right
                ),
            });
        }
    }

    let left_qualifier = get_qualifier(&spec.left, spec.left_alias.as_deref());
    let right_qualifier = get_qualifier(&spec.right, spec.right_alias.as_deref());
    if let (Some(left), Some(right)) = (left_qualifier, right_qualifier) {
        if left == right {
            return Err(JoinError::InvalidAlias {
                alias: left.to_string(),
                reason: "both sides of the join have the same name".to_string(),
            });
        }
    }

    let to_source = |alias: &Option<String>| {
        alias
            .as_ref()
            .map(|name| SourceDefinition::Alias { name: name.clone() })
    };
    Ok((to_source(&spec.left_alias), to_source(&spec.right_alias)))
}

fn validate_alias(alias: &str) -> JoinResult<()> {
    let reason = if alias.is_empty() {
        "alias is empty"
    } else if alias.contains('.') || alias.chars().any(char::is_whitespace) {
        "alias must be a single identifier"
    } else {
        return Ok(());
    };
    Err(JoinError::InvalidAlias {
        alias: alias.to_string(),
        reason: reason.to_string(),
    })
}

// Explicit alias, else the relation name. Unaliased subqueries keep their own qualifiers.
fn get_qualifier<'b>(relation: &'b RelationRef, alias: Option<&'b str>) -> Option<&'b str> {
    alias.or_else(|| relation.name())
}

// Each column of the joined input must stay addressable by its qualified name.
fn validate_distinct_columns(input_schema: &Schema) -> JoinResult<()> {
    let Some(field) = input_schema.find_duplicate() else {
        return Ok(());
    };
    match field.source.qualifier() {
        Some(qualifier) => Err(JoinError::InvalidAlias {
            alias: qualifier.to_string(),
            reason: format!(
                "column {} appears more than once in the join input",
                field.qualified_name()
            ),
        }),
        None => Err(JoinError::SchemaConflict {
            column: field.name.clone(),
        }),
    }
}

fn requalify(schema: &Schema, source: Option<SourceDefinition>) -> Schema {
    match source {
        Some(source) => schema.with_source(&source),
        None => schema.clone(),
    }
}

fn build_predicate(
    spec: &JoinSpec,
    join_type: JoinType,
    input_schema: &Schema,
) -> JoinResult<Option<Expression>> {
    match (join_type, &spec.predicate) {
        (JoinType::Cross, None) => Ok(None),
        (JoinType::Cross, Some(predicate)) => Err(JoinError::InvalidPredicate {
            predicate: predicate.to_string(),
            reason: "a cross join takes no predicate".to_string(),
        }),
        (_, None) => Err(JoinError::InvalidPredicate {
            predicate: String::new(),
            reason: format!("{} join requires a predicate", spec.kind),
        }),
        (_, Some(predicate)) => ExpressionBuilder::new()
            .build_predicate(predicate, input_schema)
            .map(Some)
            .map_err(|e| JoinError::InvalidPredicate {
                predicate: predicate.to_string(),
                reason: e.to_string(),
            }),
    }
}

/// Key columns when `predicate` is a conjunction of `left column = right column` over
/// columns of the same type, which a hash lookup answers exactly.
fn get_equi_keys(predicate: &Expression, input_schema: &Schema, left_len: usize) -> Option<EquiKeys> {
    let mut keys = EquiKeys {
        left: vec![],
        right: vec![],
    };
    collect_equi_keys(predicate, input_schema, left_len, &mut keys).then_some(keys)
}

fn collect_equi_keys(
    expression: &Expression,
    input_schema: &Schema,
    left_len: usize,
    keys: &mut EquiKeys,
) -> bool {
    match expression {
        Expression::BinaryOperator {
            left,
            operator: BinaryOperatorType::And,
            right,
        } => {
            collect_equi_keys(left, input_schema, left_len, keys)
                && collect_equi_keys(right, input_schema, left_len, keys)
        }
        Expression::BinaryOperator {
            left,
            operator: BinaryOperatorType::Eq,
            right,
        } => {
            let (Expression::Column { index: a }, Expression::Column { index: b }) =
                (left.as_ref(), right.as_ref())
            else {
                return false;
            };
            let (left_index, right_index) = match (*a < left_len, *b < left_len) {
                (true, false) => (*a, *b),
                (false, true) => (*b, *a),
                _ => return false,
            };
            match (
                input_schema.fields.get(left_index),
                input_schema.fields.get(right_index),
            ) {
                (Some(left_field), Some(right_field)) if left_field.typ == right_field.typ => {
                    keys.left.push(left_index);
                    keys.right.push(right_index - left_len);
                    true
                }
                _ => false,
            }
        }
        _ => false,
    }
}

fn get_output_schema(
    join_type: JoinType,
    naming: ColumnNaming,
    left_schema: &Schema,
    right_schema: &Schema,
) -> JoinResult<Schema> {
    let left_schema = if join_type.preserves_right() {
        left_schema.to_nullable()
    } else {
        left_schema.clone()
    };
    let right_schema = if join_type.preserves_left() {
        right_schema.to_nullable()
    } else {
        right_schema.clone()
    };
    let output_schema = left_schema.concat(&right_schema);

    match naming {
        ColumnNaming::Qualified => Ok(output_schema),
        ColumnNaming::Unqualified => {
            let mut names = HashSet::new();
            for field in &output_schema.fields {
                if !names.insert(field.name.as_str()) {
                    return Err(JoinError::SchemaConflict {
                        column: field.name.clone(),
                    });
                }
            }
            Ok(output_schema.with_source(&SourceDefinition::Dynamic))
        }
    }
}
