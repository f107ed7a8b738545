use joinkit_types::relation::Relation;
use joinkit_types::types::{Field, FieldType};

use crate::source::MemorySource;

pub(crate) fn employees() -> Relation {
    Relation::from_table(
        "employees",
        &[
            ("EmployeeID", FieldType::Int, false),
            ("LastName", FieldType::String, false),
            ("DepartmentID", FieldType::Int, true),
            ("manager_id", FieldType::Int, true),
            ("Salary", FieldType::Float, false),
        ],
        vec![
            employee(1, "Rafferty", Some(31), None, 5000.0),
            employee(2, "Jones", Some(33), Some(1), 4200.0),
            employee(3, "Heisenberg", Some(33), Some(2), 4800.0),
            employee(4, "Robinson", Some(34), Some(1), 3100.0),
            employee(5, "Smith", Some(34), Some(4), 2900.0),
            employee(6, "Williams", None, None, 3500.0),
        ],
    )
    .unwrap()
}

fn employee(
    id: i64,
    last_name: &str,
    department_id: Option<i64>,
    manager_id: Option<i64>,
    salary: f64,
) -> Vec<Field> {
    vec![
        Field::Int(id),
        Field::from(last_name),
        Field::from(department_id),
        Field::from(manager_id),
        Field::from(salary),
    ]
}

pub(crate) fn departments() -> Relation {
    Relation::from_table(
        "departments",
        &[
            ("DepartmentID", FieldType::Int, false),
            ("DepartmentName", FieldType::String, false),
        ],
        vec![
            vec![Field::Int(31), Field::from("Sales")],
            vec![Field::Int(33), Field::from("Engineering")],
            vec![Field::Int(34), Field::from("Clerical")],
            vec![Field::Int(35), Field::from("Marketing")],
        ],
    )
    .unwrap()
}

pub(crate) fn company() -> MemorySource {
    MemorySource::new()
        .with_relation("employees", employees())
        .with_relation("departments", departments())
}

/// Values of `column` in row order, for compact assertions.
pub(crate) fn column(relation: &Relation, column: &str) -> Vec<Field> {
    relation
        .column(column)
        .unwrap()
        .into_iter()
        .cloned()
        .collect()
}
