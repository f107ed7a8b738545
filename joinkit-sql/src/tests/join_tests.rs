use joinkit_sql_expression::ast::{col, lit, Expr};
use joinkit_tracing::init_telemetry_closure;
use joinkit_types::models::config::{EvaluatorOptions, JoinStrategy};
use joinkit_types::models::telemetry::TelemetryConfig;
use joinkit_types::relation::Relation;
use joinkit_types::types::{Field, FieldType};

use crate::errors::JoinError;
use crate::evaluator::{evaluate, Evaluator};
use crate::product::join::{ColumnNaming, JoinKind, JoinSpec};
use crate::source::{MemorySource, RelationSource};
use crate::tests::utils::{column, company, departments, employees};

fn department_keys() -> Expr {
    col("employees.DepartmentID").eq(col("departments.DepartmentID"))
}

fn run(kind: JoinKind, strategy: JoinStrategy) -> Relation {
    let source = company();
    let spec = JoinSpec::new(kind, "employees", "departments").with_predicate(department_keys());
    let options = EvaluatorOptions {
        join_strategy: strategy,
        cross_join_row_limit: None,
    };
    Evaluator::with_options(&source, options)
        .evaluate(&spec)
        .unwrap()
}

fn names(values: &[Option<&str>]) -> Vec<Field> {
    values.iter().map(|value| Field::from(*value)).collect()
}

#[test]
fn test_inner_join() {
    for strategy in [JoinStrategy::Hash, JoinStrategy::NestedLoop] {
        let output = run(JoinKind::Inner, strategy);
        assert_eq!(output.len(), 5);
        assert_eq!(output.schema().len(), 7);
        assert_eq!(
            column(&output, "employees.LastName"),
            names(&[
                Some("Rafferty"),
                Some("Jones"),
                Some("Heisenberg"),
                Some("Robinson"),
                Some("Smith")
            ])
        );
        assert_eq!(
            column(&output, "DepartmentName"),
            names(&[
                Some("Sales"),
                Some("Engineering"),
                Some("Engineering"),
                Some("Clerical"),
                Some("Clerical")
            ])
        );
    }
}

#[test]
fn test_left_outer_join() {
    for strategy in [JoinStrategy::Hash, JoinStrategy::NestedLoop] {
        let output = run(JoinKind::LeftOuter, strategy);
        assert_eq!(output.len(), 6);
        assert_eq!(output.value(5, "LastName").unwrap(), &Field::from("Williams"));
        assert_eq!(output.value(5, "DepartmentName").unwrap(), &Field::Null);
        assert_eq!(
            output.value(5, "departments.DepartmentID").unwrap(),
            &Field::Null
        );
        assert!(!column(&output, "DepartmentName").contains(&Field::from("Marketing")));
    }
}

#[test]
fn test_right_outer_join() {
    for strategy in [JoinStrategy::Hash, JoinStrategy::NestedLoop] {
        let output = run(JoinKind::RightOuter, strategy);
        assert_eq!(output.len(), 6);
        assert_eq!(
            column(&output, "LastName"),
            names(&[
                Some("Rafferty"),
                Some("Jones"),
                Some("Heisenberg"),
                Some("Robinson"),
                Some("Smith"),
                None
            ])
        );
        assert_eq!(output.value(5, "DepartmentName").unwrap(), &Field::from("Marketing"));
        assert!(!column(&output, "LastName").contains(&Field::from("Williams")));
    }
}

#[test]
fn test_full_outer_join() {
    for strategy in [JoinStrategy::Hash, JoinStrategy::NestedLoop] {
        let output = run(JoinKind::FullOuter, strategy);
        assert_eq!(output.len(), 7);
        assert_eq!(
            column(&output, "LastName"),
            names(&[
                Some("Rafferty"),
                Some("Jones"),
                Some("Heisenberg"),
                Some("Robinson"),
                Some("Smith"),
                Some("Williams"),
                None
            ])
        );
        assert_eq!(
            column(&output, "DepartmentName"),
            names(&[
                Some("Sales"),
                Some("Engineering"),
                Some("Engineering"),
                Some("Clerical"),
                Some("Clerical"),
                None,
                Some("Marketing")
            ])
        );
    }
}

#[test]
fn test_cross_join() {
    let source = company();
    let output = evaluate(&source, &JoinSpec::cross("employees", "departments")).unwrap();
    assert_eq!(output.len(), 24);
    assert_eq!(output.value(0, "DepartmentName").unwrap(), &Field::from("Sales"));
    assert_eq!(output.value(3, "DepartmentName").unwrap(), &Field::from("Marketing"));
    assert_eq!(output.value(4, "LastName").unwrap(), &Field::from("Jones"));
}

#[test]
fn test_cross_join_row_limit() {
    let source = company();
    let spec = JoinSpec::cross("employees", "departments");

    let within = EvaluatorOptions {
        cross_join_row_limit: Some(24),
        ..Default::default()
    };
    assert_eq!(
        Evaluator::with_options(&source, within)
            .evaluate(&spec)
            .unwrap()
            .len(),
        24
    );

    let below = EvaluatorOptions {
        cross_join_row_limit: Some(23),
        ..Default::default()
    };
    assert!(matches!(
        Evaluator::with_options(&source, below).evaluate(&spec),
        Err(JoinError::RowLimitExceeded { limit: 23, rows: 24 })
    ));
}

#[test]
fn test_general_predicates() {
    let source = company();

    // employees whose department id is lower than the department's, excluding Marketing
    let spec = JoinSpec::inner(
        "employees",
        "departments",
        col("employees.DepartmentID")
            .lt(col("departments.DepartmentID"))
            .and(col("DepartmentName").not_like(lit("Mark%"))),
    );
    let output = evaluate(&source, &spec).unwrap();
    // Rafferty (31) < 33, 34; Jones, Heisenberg (33) < 34
    assert_eq!(output.len(), 4);
    assert_eq!(
        column(&output, "DepartmentName"),
        names(&[
            Some("Engineering"),
            Some("Clerical"),
            Some("Clerical"),
            Some("Clerical")
        ])
    );

    let spec = JoinSpec::left_outer(
        "employees",
        "departments",
        department_keys().or(col("employees.DepartmentID")
            .is_null()
            .and(col("DepartmentName").eq(lit("Marketing")))),
    );
    let output = evaluate(&source, &spec).unwrap();
    assert_eq!(output.len(), 6);
    assert_eq!(output.value(5, "DepartmentName").unwrap(), &Field::from("Marketing"));
}

#[test]
fn test_unqualified_naming() {
    let budgets = Relation::from_table(
        "budgets",
        &[
            ("BudgetDepartmentID", FieldType::Int, false),
            ("Amount", FieldType::Int, false),
        ],
        vec![vec![Field::Int(33), Field::Int(1000)]],
    )
    .unwrap();
    let source = MemorySource::new()
        .with_relation("departments", departments())
        .with_relation("budgets", budgets);

    let spec = JoinSpec::inner(
        "departments",
        "budgets",
        col("DepartmentID").eq(col("BudgetDepartmentID")),
    )
    .with_naming(ColumnNaming::Unqualified);
    let output = evaluate(&source, &spec).unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(output.value(0, "DepartmentName").unwrap(), &Field::from("Engineering"));
    assert_eq!(output.value(0, "Amount").unwrap(), &Field::Int(1000));
    assert!(output.value(0, "budgets.Amount").is_err());
}

#[test]
fn test_inputs_are_not_modified() {
    let source = company();
    let spec = JoinSpec::full_outer("employees", "departments", department_keys());
    evaluate(&source, &spec).unwrap();

    assert_eq!(source.relation("employees"), Some(&employees()));
    assert_eq!(source.relation("departments"), Some(&departments()));
}

#[test]
fn test_memory_source_replaces_relations() {
    let mut source = MemorySource::new();
    assert!(source.is_empty());
    assert!(source.insert("employees", departments()).is_none());
    assert_eq!(source.insert("employees", employees()), Some(departments()));
    assert_eq!(source.len(), 1);
    assert_eq!(source.relation("employees"), Some(&employees()));
    assert!(source.relation("departments").is_none());
}

#[test]
fn test_join_with_scoped_logging() {
    let config = TelemetryConfig {
        filter: "joinkit_sql=trace".to_string(),
        with_target: true,
    };
    let output = init_telemetry_closure(Some(config), || run(JoinKind::Inner, JoinStrategy::Hash))
        .unwrap();
    assert_eq!(output.len(), 5);
    assert!(output.to_string().contains("Heisenberg"));
}
