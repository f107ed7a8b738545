use joinkit_sql_expression::ast::{col, Expr};
use joinkit_types::models::config::{EvaluatorOptions, JoinStrategy};
use joinkit_types::relation::Relation;
use joinkit_types::types::{Field, FieldType, Record};
use proptest::prelude::*;

use crate::evaluator::Evaluator;
use crate::product::join::{JoinKind, JoinSpec};
use crate::source::MemorySource;

// l(id, k) and r(k, tag), where id and tag are row positions
fn source(left_keys: &[Option<i64>], right_keys: &[Option<i64>]) -> MemorySource {
    let left = Relation::from_table(
        "l",
        &[("id", FieldType::Int, false), ("k", FieldType::Int, true)],
        left_keys
            .iter()
            .enumerate()
            .map(|(id, k)| vec![Field::Int(id as i64), Field::from(*k)])
            .collect(),
    )
    .unwrap();
    let right = Relation::from_table(
        "r",
        &[("k", FieldType::Int, true), ("tag", FieldType::Int, false)],
        right_keys
            .iter()
            .enumerate()
            .map(|(tag, k)| vec![Field::from(*k), Field::Int(tag as i64)])
            .collect(),
    )
    .unwrap();
    MemorySource::new()
        .with_relation("l", left)
        .with_relation("r", right)
}

fn keys() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::of(0_i64..4), 0..8)
}

fn predicate() -> Expr {
    col("l.k").eq(col("r.k"))
}

fn join(source: &MemorySource, kind: JoinKind, strategy: JoinStrategy) -> Vec<Record> {
    let spec = if kind == JoinKind::Cross {
        JoinSpec::cross("l", "r")
    } else {
        JoinSpec::new(kind, "l", "r").with_predicate(predicate())
    };
    let options = EvaluatorOptions {
        join_strategy: strategy,
        cross_join_row_limit: None,
    };
    Evaluator::with_options(source, options)
        .evaluate(&spec)
        .unwrap()
        .into_records()
}

fn pairs(records: &[Record]) -> Vec<(Field, Field)> {
    records
        .iter()
        .map(|record| (record.values[0].clone(), record.values[3].clone()))
        .collect()
}

proptest! {
    #[test]
    fn cross_join_cardinality(left in keys(), right in keys()) {
        let source = source(&left, &right);
        let output = join(&source, JoinKind::Cross, JoinStrategy::Hash);
        prop_assert_eq!(output.len(), left.len() * right.len());
    }

    #[test]
    fn inner_rows_are_in_left_and_full(left in keys(), right in keys()) {
        let source = source(&left, &right);
        let inner = join(&source, JoinKind::Inner, JoinStrategy::Hash);
        let left_outer = join(&source, JoinKind::LeftOuter, JoinStrategy::Hash);
        let full_outer = join(&source, JoinKind::FullOuter, JoinStrategy::Hash);
        for record in &inner {
            prop_assert!(left_outer.contains(record));
            prop_assert!(full_outer.contains(record));
        }
    }

    #[test]
    fn left_and_right_outer_are_symmetric(left in keys(), right in keys()) {
        let source = source(&left, &right);
        let left_outer = join(&source, JoinKind::LeftOuter, JoinStrategy::Hash);

        let spec = JoinSpec::right_outer("r", "l", predicate());
        let right_outer = Evaluator::new(&source).evaluate(&spec).unwrap();
        let reordered: Vec<Record> = right_outer
            .records()
            .iter()
            .map(|record| {
                let (r, l) = record.values.split_at(2);
                Record::new([l, r].concat())
            })
            .collect();

        prop_assert_eq!(left_outer, reordered);
    }

    #[test]
    fn outer_joins_keep_every_preserved_row(left in keys(), right in keys()) {
        let source = source(&left, &right);
        let left_ids: Vec<Field> = join(&source, JoinKind::LeftOuter, JoinStrategy::Hash)
            .iter()
            .map(|record| record.values[0].clone())
            .collect();
        for id in 0..left.len() {
            prop_assert!(left_ids.contains(&Field::Int(id as i64)));
        }

        let right_tags: Vec<Field> = join(&source, JoinKind::RightOuter, JoinStrategy::Hash)
            .iter()
            .map(|record| record.values[3].clone())
            .collect();
        for tag in 0..right.len() {
            prop_assert!(right_tags.contains(&Field::Int(tag as i64)));
        }
    }

    #[test]
    fn null_keys_never_match(left in keys(), right in keys()) {
        let source = source(&left, &right);
        for strategy in [JoinStrategy::Hash, JoinStrategy::NestedLoop] {
            for record in join(&source, JoinKind::Inner, strategy) {
                prop_assert!(!record.values[1].is_null());
                prop_assert_eq!(&record.values[1], &record.values[2]);
            }
        }
    }

    #[test]
    fn full_outer_has_no_duplicates(left in keys(), right in keys()) {
        let source = source(&left, &right);
        let inner = pairs(&join(&source, JoinKind::Inner, JoinStrategy::Hash));
        let full_outer = pairs(&join(&source, JoinKind::FullOuter, JoinStrategy::Hash));

        let matched: Vec<_> = full_outer
            .iter()
            .filter(|(id, tag)| !id.is_null() && !tag.is_null())
            .cloned()
            .collect();
        prop_assert_eq!(&matched, &inner);

        let unmatched_left = (0..left.len())
            .filter(|id| !inner.iter().any(|(i, _)| i == &Field::Int(*id as i64)))
            .count();
        let unmatched_right = (0..right.len())
            .filter(|tag| !inner.iter().any(|(_, t)| t == &Field::Int(*tag as i64)))
            .count();
        prop_assert_eq!(full_outer.len(), inner.len() + unmatched_left + unmatched_right);
    }

    #[test]
    fn evaluation_is_deterministic(left in keys(), right in keys()) {
        let source = source(&left, &right);
        for kind in [
            JoinKind::Cross,
            JoinKind::Inner,
            JoinKind::LeftOuter,
            JoinKind::RightOuter,
            JoinKind::FullOuter,
        ] {
            let first = join(&source, kind.clone(), JoinStrategy::Hash);
            prop_assert_eq!(&first, &join(&source, kind.clone(), JoinStrategy::Hash));
            prop_assert_eq!(&first, &join(&source, kind, JoinStrategy::NestedLoop));
        }
    }
}
