use joinkit_types::types::{Field, Record};

use crate::error::Error;
use crate::execution::Expression::Literal;
use crate::logical::{evaluate_and, evaluate_not, evaluate_or};

const T: Field = Field::Boolean(true);
const F: Field = Field::Boolean(false);
const N: Field = Field::Null;

#[test]
fn test_and_truth_table() {
    let row = Record::new(vec![]);
    let cases = [
        (T, T, T),
        (T, F, F),
        (T, N, N),
        (F, T, F),
        (F, F, F),
        (F, N, F),
        (N, T, N),
        (N, F, F),
        (N, N, N),
    ];
    for (left, right, expected) in cases {
        assert_eq!(
            evaluate_and(&Literal(left.clone()), &Literal(right.clone()), &row).unwrap(),
            expected,
            "{left} AND {right}"
        );
    }
}

#[test]
fn test_or_truth_table() {
    let row = Record::new(vec![]);
    let cases = [
        (T, T, T),
        (T, F, T),
        (T, N, T),
        (F, T, T),
        (F, F, F),
        (F, N, N),
        (N, T, T),
        (N, F, N),
        (N, N, N),
    ];
    for (left, right, expected) in cases {
        assert_eq!(
            evaluate_or(&Literal(left.clone()), &Literal(right.clone()), &row).unwrap(),
            expected,
            "{left} OR {right}"
        );
    }
}

#[test]
fn test_not() {
    let row = Record::new(vec![]);
    assert_eq!(evaluate_not(&Literal(T), &row).unwrap(), F);
    assert_eq!(evaluate_not(&Literal(F), &row).unwrap(), T);
    assert_eq!(evaluate_not(&Literal(N), &row).unwrap(), N);
    assert!(matches!(
        evaluate_not(&Literal(Field::Int(1)), &row),
        Err(Error::InvalidType(Field::Int(1), _))
    ));
}

#[test]
fn test_logical_operand_must_be_boolean() {
    let row = Record::new(vec![]);
    assert!(evaluate_and(&Literal(T), &Literal(Field::Int(1)), &row).is_err());
    assert!(evaluate_or(&Literal(Field::from("x")), &Literal(F), &row).is_err());
}
