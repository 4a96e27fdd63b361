//! Tests for RecordClassifier: ids, vacancies, defaults and the org-level ladder

use rstest::rstest;

use orgchart::domain::{EmployeeRecord, OrgType, RecordClassifier};

fn record(id: &str, name: &str, position: &str, supervisor: &str) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id.into(),
        name: name.into(),
        position: position.into(),
        supervisor_id: supervisor.into(),
        ..EmployeeRecord::default()
    }
}

// ============================================================
// Identity
// ============================================================

#[test]
fn given_duplicate_employee_ids_when_classifying_then_second_gets_dup_suffix() {
    // Arrange
    let records = vec![
        record("E1", "Alice", "Engineer", ""),
        record("E1", "Bob", "Engineer", ""),
    ];

    // Act
    let nodes = RecordClassifier::default().classify_all(&records);

    // Assert
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, "E1");
    assert_eq!(nodes[1].id, "E1-DUP-2");
    assert_eq!(nodes[1].employee_id, "E1");
}

#[test]
fn given_vacant_row_without_supervisor_when_classifying_then_id_is_root_marker() {
    // Arrange
    let mut records = vec![
        record("E1", "Alice", "CEO", ""),
        record("E2", "Bob", "Engineer", "E1"),
        record("E3", "Carol", "Engineer", "E1"),
    ];
    records.push(EmployeeRecord {
        position: "Engineer".into(),
        ..EmployeeRecord::default()
    });

    // Act
    let nodes = RecordClassifier::default().classify_all(&records);

    // Assert
    let vacant = &nodes[3];
    assert_eq!(vacant.id, "VACANT-4-ROOT");
    assert!(vacant.is_vacant);
    assert_eq!(vacant.name, "Vacant");
    assert_eq!(vacant.corporate_title, "Vacant");
    assert_eq!(vacant.manager_id, None);
}

#[test]
fn given_vacant_row_with_supervisor_when_classifying_then_id_names_manager() {
    // Arrange
    let records = vec![
        record("E1", "Alice", "CEO", ""),
        EmployeeRecord {
            supervisor_id: "E1".into(),
            position: "Analyst".into(),
            service_date: "2020-01-01".into(),
            ..EmployeeRecord::default()
        },
    ];

    // Act
    let nodes = RecordClassifier::default().classify_all(&records);

    // Assert
    assert_eq!(nodes[1].id, "VACANT-2-E1");
    assert_eq!(nodes[1].manager_id.as_deref(), Some("E1"));
    assert_eq!(nodes[1].hire_date, "", "vacant slots carry no hire date");
}

#[test]
fn given_two_identical_vacant_rows_when_classifying_then_ids_stay_unique() {
    // Arrange
    let vacant = EmployeeRecord {
        position: "Analyst".into(),
        supervisor_id: "E1".into(),
        ..EmployeeRecord::default()
    };
    let records = vec![vacant.clone(), vacant];

    // Act
    let nodes = RecordClassifier::default().classify_all(&records);

    // Assert
    assert_eq!(nodes[0].id, "VACANT-1-E1");
    assert_eq!(nodes[1].id, "VACANT-2-E1");
}

#[test]
fn given_blank_name_and_position_when_classifying_then_row_is_skipped() {
    // Arrange
    let records = vec![
        record("E1", "Alice", "Engineer", ""),
        record("E2", "", "", "E1"),
    ];

    // Act
    let nodes = RecordClassifier::default().classify_all(&records);

    // Assert
    assert_eq!(nodes.len(), 1);
}

#[test]
fn given_missing_optional_fields_when_classifying_then_defaults_apply() {
    // Act
    let nodes = RecordClassifier::default().classify_all(&[record("E1", "Alice", "", "")]);

    // Assert
    let node = &nodes[0];
    assert_eq!(node.position, "Vacant Position");
    assert_eq!(node.corporate_title, "Not Specified");
    assert_eq!(node.email, "-");
    assert!(!node.is_vacant);
    assert!(!node.is_org_node);
}

// ============================================================
// Org-level ladder
// ============================================================

fn placed(
    position: &str,
    title: &str,
    group: &str,
    division: &str,
    department: &str,
    unit: &str,
) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: "E1".into(),
        name: "Someone".into(),
        position: position.into(),
        corporate_title: title.into(),
        group: group.into(),
        division: division.into(),
        department: department.into(),
        unit: unit.into(),
        ..EmployeeRecord::default()
    }
}

#[rstest]
#[case::ceo_position(placed("CEO", "", "G", "D", "Dep", "U"), OrgType::Company, "CardX")]
#[case::ceo_long_form(placed("Chief Executive Officer", "", "G", "", "", ""), OrgType::Company, "CardX")]
#[case::chief_takes_deepest(placed("Chief Risk Officer", "", "G", "D", "Dep", ""), OrgType::Department, "Dep")]
#[case::chief_by_title(placed("Director", "Chief", "G", "D", "", ""), OrgType::Division, "D")]
#[case::chief_without_levels(placed("Chief Data Officer", "", "", "", "", ""), OrgType::Company, "CardX")]
#[case::unit_first(placed("Engineer", "", "G", "D", "Dep", "U"), OrgType::Unit, "U")]
#[case::department(placed("Engineer", "", "G", "D", "Dep", ""), OrgType::Department, "Dep")]
#[case::cpo_office(placed("Engineer", "", "G", "The CPO Office", "", ""), OrgType::Group, "G")]
#[case::division(placed("Engineer", "", "G", "D", "", ""), OrgType::Division, "D")]
#[case::group(placed("Engineer", "", "G", "", "", ""), OrgType::Group, "G")]
#[case::company(placed("Engineer", "", "", "", "", ""), OrgType::Company, "CardX")]
fn given_row_levels_when_classifying_then_first_matching_rule_wins(
    #[case] input: EmployeeRecord,
    #[case] org_type: OrgType,
    #[case] org_name: &str,
) {
    // Act
    let node = RecordClassifier::default().classify(&input, 0).unwrap();

    // Assert
    assert_eq!(node.org_type, org_type);
    assert_eq!(node.org_name, org_name);
}

#[test]
fn given_company_column_when_classifying_ceo_then_company_name_is_used() {
    // Arrange
    let input = EmployeeRecord {
        company: "Acme".into(),
        ..placed("CEO", "", "", "", "", "")
    };

    // Act
    let node = RecordClassifier::new("Fallback").classify(&input, 0).unwrap();

    // Assert
    assert_eq!(node.org_name, "Acme");
}

#[test]
fn given_custom_company_default_when_company_missing_then_default_is_used() {
    // Act
    let node = RecordClassifier::new("Fallback")
        .classify(&placed("Engineer", "", "", "", "", ""), 0)
        .unwrap();

    // Assert
    assert_eq!(node.org_type, OrgType::Company);
    assert_eq!(node.org_name, "Fallback");
}
