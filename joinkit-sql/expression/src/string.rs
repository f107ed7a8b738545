use joinkit_types::types::{Field, FieldAccess};
use like::{Escape, Like};

use crate::error::Error;
use crate::execution::Expression;

pub fn evaluate_like<R: FieldAccess + ?Sized>(
    arg: &Expression,
    pattern: &Expression,
    escape: Option<char>,
    negated: bool,
    record: &R,
) -> Result<Field, Error> {
    let arg_field = arg.evaluate(record)?;
    let pattern_field = pattern.evaluate(record)?;

    let (arg_value, pattern_value) = match (&arg_field, &pattern_field) {
        (Field::Null, _) | (_, Field::Null) => return Ok(Field::Null),
        (Field::String(arg_value), Field::String(pattern_value)) => (arg_value, pattern_value),
        (Field::String(_), _) => {
            return Err(Error::InvalidType(pattern_field.clone(), "LIKE".to_string()))
        }
        _ => return Err(Error::InvalidType(arg_field.clone(), "LIKE".to_string())),
    };

    let matched = match escape {
        Some(escape) => {
            let pattern_value = pattern_value
                .as_str()
                .escape(escape.to_string().as_str())?;
            Like::<true>::like(arg_value.as_str(), pattern_value.as_str())?
        }
        None => Like::<true>::like(arg_value.as_str(), pattern_value.as_str())?,
    };

    Ok(Field::Boolean(matched != negated))
}

pub fn evaluate_is_null<R: FieldAccess + ?Sized>(
    arg: &Expression,
    negated: bool,
    record: &R,
) -> Result<Field, Error> {
    let value = arg.evaluate(record)?;
    Ok(Field::Boolean(value.is_null() != negated))
}
