use joinkit_types::types::{Field, FieldType, Record};

use crate::ast::{col, lit, ColumnRef, Expr};
use crate::builder::ExpressionBuilder;
use crate::error::Error;
use crate::execution::Expression;
use crate::operator::BinaryOperatorType;
use crate::tests::test_common::{employee_department_schema, run_predicate};

#[test]
fn test_build_resolves_qualified_columns() {
    let schema = employee_department_schema();
    let expression = ExpressionBuilder::new()
        .build_predicate(
            &col("employees.DepartmentID").eq(col("departments.DepartmentID")),
            &schema,
        )
        .unwrap();

    assert_eq!(
        expression,
        Expression::BinaryOperator {
            left: Box::new(Expression::Column { index: 1 }),
            operator: BinaryOperatorType::Eq,
            right: Box::new(Expression::Column { index: 2 }),
        }
    );
    assert_eq!(
        expression.to_string(&schema),
        "employees.DepartmentID = departments.DepartmentID"
    );
}

#[test]
fn test_build_rejects_ambiguous_column() {
    let schema = employee_department_schema();
    let result = ExpressionBuilder::new().build_predicate(&col("DepartmentID").eq(lit(31)), &schema);
    assert!(matches!(
        result,
        Err(Error::AmbiguousColumn { column, candidates }) if column == "DepartmentID" && candidates.len() == 2
    ));
}

#[test]
fn test_build_rejects_unknown_column() {
    let schema = employee_department_schema();
    let result =
        ExpressionBuilder::new().build_predicate(&col("employees.Salary").gt(lit(10)), &schema);
    assert!(matches!(result, Err(Error::UnknownColumn(column)) if column == "employees.Salary"));
}

#[test]
fn test_build_rejects_ill_typed_predicates() {
    let schema = employee_department_schema();
    let builder = ExpressionBuilder::new();

    assert!(matches!(
        builder.build_predicate(&col("LastName").eq(col("employees.DepartmentID")), &schema),
        Err(Error::CannotApplyBinaryOperator {
            operator: BinaryOperatorType::Eq,
            left_field_type: FieldType::String,
            right_field_type: FieldType::Int,
        })
    ));
    assert!(matches!(
        builder.build_predicate(&col("employees.DepartmentID").like(lit("3%")), &schema),
        Err(Error::CannotApplyLike { .. })
    ));
    assert!(matches!(
        builder.build_predicate(&!col("LastName"), &schema),
        Err(Error::CannotApplyNotTo(FieldType::String))
    ));
    assert!(matches!(
        builder.build_predicate(&col("LastName"), &schema),
        Err(Error::NonBooleanPredicate(FieldType::String))
    ));
    assert!(matches!(
        builder.build_predicate(&col("LastName").eq(lit(Field::Null)), &schema),
        Err(Error::LiteralExpressionIsNull)
    ));
}

#[test]
fn test_build_accepts_numeric_mix() {
    let schema = employee_department_schema();
    let record = Record::new(vec![
        Field::from("Jones"),
        Field::Int(33),
        Field::Int(33),
        Field::from("Engineering"),
    ]);
    let predicate = col("employees.DepartmentID").lt_eq(lit(33.5));
    assert_eq!(
        run_predicate(&predicate, &schema, &record),
        Field::Boolean(true)
    );
    let predicate = col("employees.DepartmentID").gt_eq(lit(33.0));
    assert_eq!(
        run_predicate(&predicate, &schema, &record),
        Field::Boolean(true)
    );
    let predicate = col("employees.DepartmentID").not_eq(lit(33.0));
    assert_eq!(
        run_predicate(&predicate, &schema, &record),
        Field::Boolean(false)
    );
}

#[test]
fn test_null_key_never_matches() {
    let schema = employee_department_schema();
    let record = Record::new(vec![
        Field::from("Williams"),
        Field::Null,
        Field::Int(35),
        Field::from("Marketing"),
    ]);
    let equality = col("employees.DepartmentID").eq(col("departments.DepartmentID"));
    let expression = ExpressionBuilder::new()
        .build_predicate(&equality, &schema)
        .unwrap();

    assert_eq!(expression.evaluate(&record).unwrap(), Field::Null);
    assert!(!expression.matches(&record).unwrap());

    let negated = ExpressionBuilder::new()
        .build_predicate(&!equality, &schema)
        .unwrap();
    assert!(!negated.matches(&record).unwrap());

    let is_null = ExpressionBuilder::new()
        .build_predicate(&col("employees.DepartmentID").is_null(), &schema)
        .unwrap();
    assert!(is_null.matches(&record).unwrap());
}

#[test]
fn test_expr_columns_and_display() {
    let predicate = col("e.manager_id")
        .eq(col("m.EmployeeID"))
        .and(col("e.LastName").is_not_null());
    assert_eq!(
        predicate.columns(),
        vec![
            &ColumnRef::new(Some("e"), "manager_id"),
            &ColumnRef::new(Some("m"), "EmployeeID"),
            &ColumnRef::new(Some("e"), "LastName"),
        ]
    );
    assert_eq!(
        predicate.to_string(),
        "(e.manager_id = m.EmployeeID) AND (e.LastName IS NOT NULL)"
    );
    assert_eq!(
        Expr::Literal(Field::from("x")).to_string(),
        "'x'"
    );
}

#[test]
fn test_aggregate_function_names() {
    use crate::aggregate::AggregateFunctionType;

    assert_eq!(
        AggregateFunctionType::new("count").unwrap(),
        AggregateFunctionType::Count
    );
    assert_eq!(
        AggregateFunctionType::new("AVG").unwrap(),
        AggregateFunctionType::Avg
    );
    assert_eq!(AggregateFunctionType::Sum.to_string(), "SUM");
    assert!(matches!(
        AggregateFunctionType::new("median"),
        Err(Error::UnsupportedAggregateFunction(name)) if name == "median"
    ));
}
