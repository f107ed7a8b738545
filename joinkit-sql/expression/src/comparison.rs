use joinkit_types::ordered_float::OrderedFloat;
use joinkit_types::types::{Field, FieldAccess};
use num_traits::cast::FromPrimitive;

use crate::error::Error;
use crate::execution::Expression;

macro_rules! define_comparison {
    ($id:ident, $op:expr, $function:expr) => {
        pub fn $id<R: FieldAccess + ?Sized>(
            left: &Expression,
            right: &Expression,
            record: &R,
        ) -> Result<Field, Error> {
            let left_p = left.evaluate(record)?;
            let right_p = right.evaluate(record)?;

            match (&left_p, &right_p) {
                // Null never compares equal (or unequal) to anything, itself included
                (Field::Null, _) | (_, Field::Null) => Ok(Field::Null),
                // left: Int, right: Int
                (Field::Int(left_v), Field::Int(right_v)) => {
                    Ok(Field::Boolean($function(left_v, right_v)))
                }
                // left: Int, right: Float
                (Field::Int(left_v), Field::Float(right_v)) => {
                    let left_v_f = OrderedFloat::<f64>::from_i64(*left_v).ok_or(
                        Error::UnableToCast(left_v.to_string(), "Float".to_string()),
                    )?;
                    Ok(Field::Boolean($function(&left_v_f, right_v)))
                }
                // left: Float, right: Int
                (Field::Float(left_v), Field::Int(right_v)) => {
                    let right_v_f = OrderedFloat::<f64>::from_i64(*right_v).ok_or(
                        Error::UnableToCast(right_v.to_string(), "Float".to_string()),
                    )?;
                    Ok(Field::Boolean($function(left_v, &right_v_f)))
                }
                // left: Float, right: Float
                (Field::Float(left_v), Field::Float(right_v)) => {
                    Ok(Field::Boolean($function(left_v, right_v)))
                }
                // left: String, right: String
                (Field::String(left_v), Field::String(right_v)) => {
                    Ok(Field::Boolean($function(left_v, right_v)))
                }
                // left: Bool, right: Bool
                (Field::Boolean(left_v), Field::Boolean(right_v)) => {
                    Ok(Field::Boolean($function(left_v, right_v)))
                }
                _ => Err(Error::InvalidTypeComparison(
                    left_p.clone(),
                    right_p.clone(),
                    $op.to_string(),
                )),
            }
        }
    };
}

define_comparison!(evaluate_eq, "=", |l, r| { l == r });
define_comparison!(evaluate_ne, "!=", |l, r| { l != r });
define_comparison!(evaluate_lte, "<=", |l, r| { l <= r });
define_comparison!(evaluate_lt, "<", |l, r| { l < r });
define_comparison!(evaluate_gte, ">=", |l, r| { l >= r });
define_comparison!(evaluate_gt, ">", |l, r| { l > r });
