use joinkit_types::types::{Field, FieldAccess};

use crate::error::Error;
use crate::execution::Expression;

/// `Some(bool)` for booleans, `None` for null (unknown).
fn get_truth_value(field: Field, operator: &str) -> Result<Option<bool>, Error> {
    match field {
        Field::Boolean(value) => Ok(Some(value)),
        Field::Null => Ok(None),
        Field::Int(_) | Field::Float(_) | Field::String(_) => {
            Err(Error::InvalidType(field, operator.to_string()))
        }
    }
}

fn from_truth_value(value: Option<bool>) -> Field {
    value.map_or(Field::Null, Field::Boolean)
}

/// Three-valued `AND`: false wins over null, null wins over true.
pub fn evaluate_and<R: FieldAccess + ?Sized>(
    left: &Expression,
    right: &Expression,
    record: &R,
) -> Result<Field, Error> {
    let l_value = get_truth_value(left.evaluate(record)?, "AND")?;
    if l_value == Some(false) {
        return Ok(Field::Boolean(false));
    }
    let r_value = get_truth_value(right.evaluate(record)?, "AND")?;
    Ok(from_truth_value(match (l_value, r_value) {
        (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }))
}

/// Three-valued `OR`: true wins over null, null wins over false.
pub fn evaluate_or<R: FieldAccess + ?Sized>(
    left: &Expression,
    right: &Expression,
    record: &R,
) -> Result<Field, Error> {
    let l_value = get_truth_value(left.evaluate(record)?, "OR")?;
    if l_value == Some(true) {
        return Ok(Field::Boolean(true));
    }
    let r_value = get_truth_value(right.evaluate(record)?, "OR")?;
    Ok(from_truth_value(match (l_value, r_value) {
        (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }))
}

pub fn evaluate_not<R: FieldAccess + ?Sized>(
    value: &Expression,
    record: &R,
) -> Result<Field, Error> {
    let value_p = get_truth_value(value.evaluate(record)?, "NOT")?;
    Ok(from_truth_value(value_p.map(|value| !value)))
}
