use std::fmt::{Display, Formatter};

use joinkit_sql_expression::ast::Expr;
use joinkit_types::serde::{Deserialize, Serialize};

use crate::errors::JoinError;
use crate::query::RelationRef;

use self::operator::JoinType;

pub mod operator;

pub type JoinResult<T> = Result<T, JoinError>;

/// The join requested by the caller.
///
/// `SelfJoin` and `Subquery` wrap the base kind whose algorithm is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum JoinKind {
    Cross,
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    /// Both sides must be the same relation, each under its own alias.
    SelfJoin(Box<JoinKind>),
    /// At least one side must be a nested query.
    Subquery(Box<JoinKind>),
}

impl JoinKind {
    /// The base algorithm to run. Wrapping a wrapper is not supported.
    pub fn join_type(&self) -> JoinResult<JoinType> {
        match self {
            JoinKind::Cross => Ok(JoinType::Cross),
            JoinKind::Inner => Ok(JoinType::Inner),
            JoinKind::LeftOuter => Ok(JoinType::LeftOuter),
            JoinKind::RightOuter => Ok(JoinType::RightOuter),
            JoinKind::FullOuter => Ok(JoinType::FullOuter),
            JoinKind::SelfJoin(inner) | JoinKind::Subquery(inner) => match inner.as_ref() {
                JoinKind::SelfJoin(_) | JoinKind::Subquery(_) => {
                    Err(JoinError::UnsupportedJoinKind(self.to_string()))
                }
                base => base.join_type(),
            },
        }
    }

    pub fn is_self_join(&self) -> bool {
        matches!(self, JoinKind::SelfJoin(_))
    }
}

impl Display for JoinKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinKind::Cross => f.write_str("CROSS"),
            JoinKind::Inner => f.write_str("INNER"),
            JoinKind::LeftOuter => f.write_str("LEFT OUTER"),
            JoinKind::RightOuter => f.write_str("RIGHT OUTER"),
            JoinKind::FullOuter => f.write_str("FULL OUTER"),
            JoinKind::SelfJoin(inner) => write!(f, "SELF {inner}"),
            JoinKind::Subquery(inner) => write!(f, "SUBQUERY {inner}"),
        }
    }
}

/// How output columns are named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub enum ColumnNaming {
    /// Columns keep their `alias.column` qualifiers.
    #[default]
    Qualified,
    /// Qualifiers are dropped; every output column name must be unique.
    Unqualified,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "joinkit_types::serde")]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub left: RelationRef,
    pub right: RelationRef,
    #[serde(default)]
    pub predicate: Option<Expr>,
    #[serde(default)]
    pub left_alias: Option<String>,
    #[serde(default)]
    pub right_alias: Option<String>,
    #[serde(default)]
    pub naming: ColumnNaming,
}

impl JoinSpec {
    pub fn new(kind: JoinKind, left: impl Into<RelationRef>, right: impl Into<RelationRef>) -> Self {
        Self {
            kind,
            left: left.into(),
            right: right.into(),
            predicate: None,
            left_alias: None,
            right_alias: None,
            naming: ColumnNaming::default(),
        }
    }

    pub fn cross(left: impl Into<RelationRef>, right: impl Into<RelationRef>) -> Self {
        Self::new(JoinKind::Cross, left, right)
    }

    pub fn inner(
        left: impl Into<RelationRef>,
        right: impl Into<RelationRef>,
        predicate: Expr,
    ) -> Self {
        Self::new(JoinKind::Inner, left, right).with_predicate(predicate)
    }

    pub fn left_outer(
        left: impl Into<RelationRef>,
        right: impl Into<RelationRef>,
        predicate: Expr,
    ) -> Self {
        Self::new(JoinKind::LeftOuter, left, right).with_predicate(predicate)
    }

    pub fn right_outer(
        left: impl Into<RelationRef>,
        right: impl Into<RelationRef>,
        predicate: Expr,
    ) -> Self {
        Self::new(JoinKind::RightOuter, left, right).with_predicate(predicate)
    }

    pub fn full_outer(
        left: impl Into<RelationRef>,
        right: impl Into<RelationRef>,
        predicate: Expr,
    ) -> Self {
        Self::new(JoinKind::FullOuter, left, right).with_predicate(predicate)
    }

    /// `relation AS left_alias <kind> JOIN relation AS right_alias ON predicate`
    pub fn self_join(
        kind: JoinKind,
        relation: &str,
        (left_alias, right_alias): (&str, &str),
        predicate: Expr,
    ) -> Self {
        Self::new(JoinKind::SelfJoin(Box::new(kind)), relation, relation)
            .with_predicate(predicate)
            .with_left_alias(left_alias)
            .with_right_alias(right_alias)
    }

    pub fn with_predicate(mut self, predicate: Expr) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_left_alias(mut self, alias: &str) -> Self {
        self.left_alias = Some(alias.to_string());
        self
    }

    pub fn with_right_alias(mut self, alias: &str) -> Self {
        self.right_alias = Some(alias.to_string());
        self
    }

    pub fn with_naming(mut self, naming: ColumnNaming) -> Self {
        self.naming = naming;
        self
    }
}

impl Display for JoinSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.left)?;
        if let Some(alias) = &self.left_alias {
            write!(f, " AS {alias}")?;
        }
        write!(f, " {} JOIN {}", self.kind, self.right)?;
        if let Some(alias) = &self.right_alias {
            write!(f, " AS {alias}")?;
        }
        if let Some(predicate) = &self.predicate {
            write!(f, " ON {predicate}")?;
        }
        Ok(())
    }
}
