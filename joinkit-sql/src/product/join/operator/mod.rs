use std::borrow::Cow;

use joinkit_sql_expression::execution::Expression;
use joinkit_types::types::{JoinedRecord, Record};

use crate::utils::record_hashtable_key::get_join_key_fields;

use self::table::JoinTable;
use super::JoinResult;

pub mod table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    Cross,
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl JoinType {
    /// Unmatched left rows are kept, padded with nulls on the right.
    pub fn preserves_left(&self) -> bool {
        matches!(self, JoinType::LeftOuter | JoinType::FullOuter)
    }

    /// Unmatched right rows are kept, padded with nulls on the left.
    pub fn preserves_right(&self) -> bool {
        matches!(self, JoinType::RightOuter | JoinType::FullOuter)
    }
}

/// The side a row being matched comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinBranch {
    Left,
    Right,
}

/// Positions of paired equality columns: `left[i]` in the left record equals `right[i]`
/// in the right record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquiKeys {
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct JoinOperator {
    join_type: JoinType,
    predicate: Option<Expression>,
    equi_keys: Option<EquiKeys>,
    left_default_record: Record,
    right_default_record: Record,
}

impl JoinOperator {
    /// `equi_keys` switches matching to a hash lookup. They must be equivalent to
    /// `predicate`; the predicate is not re-checked for pairs found through the table.
    pub fn new(
        join_type: JoinType,
        predicate: Option<Expression>,
        equi_keys: Option<EquiKeys>,
        (left_width, right_width): (usize, usize),
    ) -> Self {
        Self {
            join_type,
            predicate,
            equi_keys,
            left_default_record: Record::nulls(left_width),
            right_default_record: Record::nulls(right_width),
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn predicate(&self) -> Option<&Expression> {
        self.predicate.as_ref()
    }

    pub fn is_hash_join(&self) -> bool {
        self.equi_keys.is_some()
    }

    /// Output rows are always `left ⊕ right`, ordered by the driving side.
    pub fn execute(&self, left: &[Record], right: &[Record]) -> JoinResult<Vec<Record>> {
        match self.join_type {
            JoinType::Cross => Ok(cross_join(left, right)),
            JoinType::Inner | JoinType::LeftOuter => Ok(self.join_from_left(left, right)?.0),
            JoinType::RightOuter => self.join_from_right(left, right),
            JoinType::FullOuter => {
                let (mut output_records, right_matched) = self.join_from_left(left, right)?;
                for (right_record, matched) in right.iter().zip(right_matched) {
                    if !matched {
                        output_records.push(Record::join(&self.left_default_record, right_record));
                    }
                }
                Ok(output_records)
            }
        }
    }

    // Also reports which right rows found a match.
    fn join_from_left(
        &self,
        left: &[Record],
        right: &[Record],
    ) -> JoinResult<(Vec<Record>, Vec<bool>)> {
        let matcher = self.matcher(JoinBranch::Left, right);
        let mut right_matched = vec![false; right.len()];
        let mut output_records = vec![];

        for left_record in left {
            let matching = matcher.find(left_record, right)?;

            // no joining records on the right branch
            if matching.is_empty() {
                if self.join_type.preserves_left() {
                    output_records.push(Record::join(left_record, &self.right_default_record));
                }
                continue;
            }

            for &position in matching.iter() {
                right_matched[position] = true;
                output_records.push(Record::join(left_record, &right[position]));
            }
        }

        Ok((output_records, right_matched))
    }

    fn join_from_right(&self, left: &[Record], right: &[Record]) -> JoinResult<Vec<Record>> {
        let matcher = self.matcher(JoinBranch::Right, left);
        let mut output_records = vec![];

        for right_record in right {
            let matching = matcher.find(right_record, left)?;

            // no joining records on the left branch
            if matching.is_empty() {
                output_records.push(Record::join(&self.left_default_record, right_record));
                continue;
            }

            for &position in matching.iter() {
                output_records.push(Record::join(&left[position], right_record));
            }
        }

        Ok(output_records)
    }

    fn matcher<'a>(&'a self, from: JoinBranch, others: &[Record]) -> Matcher<'a> {
        match &self.equi_keys {
            Some(keys) => {
                let (probe_key_indexes, table_key_indexes) = match from {
                    JoinBranch::Left => (&keys.left, &keys.right),
                    JoinBranch::Right => (&keys.right, &keys.left),
                };
                Matcher::Hash {
                    table: JoinTable::new(table_key_indexes, others),
                    probe_key_indexes,
                }
            }
            None => Matcher::NestedLoop {
                from,
                predicate: self.predicate.as_ref(),
            },
        }
    }
}

enum Matcher<'a> {
    Hash {
        table: JoinTable,
        probe_key_indexes: &'a [usize],
    },
    NestedLoop {
        from: JoinBranch,
        predicate: Option<&'a Expression>,
    },
}

impl Matcher<'_> {
    /// Positions in `others` matching `record`, in `others` order.
    fn find<'b>(&'b self, record: &Record, others: &[Record]) -> JoinResult<Cow<'b, [usize]>> {
        match self {
            Matcher::Hash {
                table,
                probe_key_indexes,
            } => Ok(match get_join_key_fields(record, probe_key_indexes) {
                Some(join_key) => Cow::Borrowed(table.get_matching_records(&join_key)),
                None => Cow::Borrowed(&[][..]),
            }),
            Matcher::NestedLoop { from, predicate } => {
                let mut positions = vec![];
                for (position, other) in others.iter().enumerate() {
                    let joined = match from {
                        JoinBranch::Left => JoinedRecord::new(record, other),
                        JoinBranch::Right => JoinedRecord::new(other, record),
                    };
                    let matched = match predicate {
                        Some(predicate) => predicate.matches(&joined)?,
                        None => true,
                    };
                    if matched {
                        positions.push(position);
                    }
                }
                Ok(Cow::Owned(positions))
            }
        }
    }
}

fn cross_join(left: &[Record], right: &[Record]) -> Vec<Record> {
    left.iter()
        .flat_map(|left_record| {
            right
                .iter()
                .map(move |right_record| Record::join(left_record, right_record))
        })
        .collect()
}
