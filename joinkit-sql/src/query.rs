//! Inputs of a join: named relations from a [`RelationSource`](crate::source::RelationSource)
//! or nested queries that are evaluated first and consumed as derived tables.

use std::fmt::{Display, Formatter};

use joinkit_sql_expression::aggregate::AggregateFunctionType;
use joinkit_types::serde::{Deserialize, Serialize};

use crate::product::join::JoinSpec;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum RelationRef {
    Named(String),
    Subquery(Box<Query>),
}

impl RelationRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            RelationRef::Named(name) => Some(name),
            RelationRef::Subquery(_) => None,
        }
    }
}

impl Display for RelationRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationRef::Named(name) => f.write_str(name),
            RelationRef::Subquery(query) => write!(f, "({query})"),
        }
    }
}

impl From<&str> for RelationRef {
    fn from(name: &str) -> Self {
        RelationRef::Named(name.to_string())
    }
}

impl From<String> for RelationRef {
    fn from(name: String) -> Self {
        RelationRef::Named(name)
    }
}

impl From<Query> for RelationRef {
    fn from(query: Query) -> Self {
        RelationRef::Subquery(Box::new(query))
    }
}

impl From<JoinSpec> for RelationRef {
    fn from(spec: JoinSpec) -> Self {
        Query::Join(spec).into()
    }
}

impl From<AggregationSpec> for RelationRef {
    fn from(spec: AggregationSpec) -> Self {
        Query::Aggregate(spec).into()
    }
}

/// Anything that produces a relation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum Query {
    Join(JoinSpec),
    Aggregate(AggregationSpec),
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Join(spec) => write!(f, "{spec}"),
            Query::Aggregate(spec) => write!(f, "{spec}"),
        }
    }
}

impl From<JoinSpec> for Query {
    fn from(spec: JoinSpec) -> Self {
        Query::Join(spec)
    }
}

impl From<AggregationSpec> for Query {
    fn from(spec: AggregationSpec) -> Self {
        Query::Aggregate(spec)
    }
}

/// One aggregate over an input relation, grouped by zero or more columns.
///
/// The result has the grouping columns, in `group_by` order, followed by the
/// aggregate value in a column named `output`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub struct AggregationSpec {
    pub input: RelationRef,
    #[serde(default)]
    pub group_by: Vec<String>,
    pub function: AggregateFunctionType,
    /// `None` only for `COUNT(*)`.
    #[serde(default)]
    pub column: Option<String>,
    pub output: String,
}

impl AggregationSpec {
    pub fn new(
        input: impl Into<RelationRef>,
        function: AggregateFunctionType,
        column: Option<&str>,
        output: &str,
    ) -> Self {
        Self {
            input: input.into(),
            group_by: vec![],
            function,
            column: column.map(str::to_string),
            output: output.to_string(),
        }
    }

    /// `COUNT(*)`
    pub fn count(input: impl Into<RelationRef>, output: &str) -> Self {
        Self::new(input, AggregateFunctionType::Count, None, output)
    }

    pub fn group_by(mut self, column: &str) -> Self {
        self.group_by.push(column.to_string());
        self
    }
}

impl Display for AggregationSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}) AS {} FROM {}",
            self.function,
            self.column.as_deref().unwrap_or("*"),
            self.output,
            self.input
        )?;
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", self.group_by.join(", "))?;
        }
        Ok(())
    }
}
