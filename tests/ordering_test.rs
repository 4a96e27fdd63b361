//! Tests for title ranking and sibling ordering

use std::cmp::Ordering;

use rstest::rstest;

use orgchart::domain::ordering::{
    compare_report_order, compare_siblings, is_assistant_role, is_ceo, title_rank, UNRANKED,
};
use orgchart::domain::{EmployeeRecord, OrgNode, OrgPath, OrgType, RecordClassifier};

fn person(id: &str, name: &str, position: &str, title: &str) -> OrgNode {
    let input = EmployeeRecord {
        employee_id: id.into(),
        name: name.into(),
        position: position.into(),
        corporate_title: title.into(),
        ..EmployeeRecord::default()
    };
    RecordClassifier::default().classify(&input, 0).unwrap()
}

#[rstest]
#[case("Chief Technology Officer", 1)]
#[case("Head of Engineering", 2)]
#[case("Team Lead", 3)]
#[case("Expert", 4)]
#[case("Senior Professional", 5)]
#[case("Professional", 6)]
#[case("Support", 7)]
#[case("Staff", 8)]
#[case("Intern", UNRANKED)]
#[case("", UNRANKED)]
#[case("  HEAD OF risk ", 2)]
fn given_title_when_ranking_then_first_matching_rule_decides(#[case] title: &str, #[case] rank: u8) {
    // Assert
    assert_eq!(title_rank(title), rank);
}

#[rstest]
#[case("Executive Assistant", true)]
#[case("Secretary to the Board", true)]
#[case("Engineer", false)]
fn given_position_when_checking_assistant_then_detects_support_roles(
    #[case] position: &str,
    #[case] expected: bool,
) {
    // Assert
    assert_eq!(is_assistant_role(position), expected);
}

#[test]
fn given_ceo_in_title_only_when_checking_then_node_is_ceo() {
    // Assert
    assert!(is_ceo(&person("E1", "Alice", "Managing Director", "Chief Executive Officer")));
    assert!(is_ceo(&person("E2", "Bob", "ceo", "")));
    assert!(!is_ceo(&person("E3", "Carol", "Chief Risk Officer", "Chief")));
}

#[test]
fn given_assistant_with_senior_title_when_ordering_then_assistant_sorts_last() {
    // Arrange
    let assistant = person("E1", "Aaron", "Executive Assistant", "Chief");
    let staff = person("E2", "Zed", "Clerk", "Staff");

    // Assert
    assert_eq!(compare_report_order(&assistant, &staff), Ordering::Greater);
}

#[test]
fn given_equal_rank_when_ordering_then_names_compare_case_insensitively() {
    // Arrange
    let lower = person("E1", "alice", "Engineer", "Expert");
    let upper = person("E2", "Bob", "Engineer", "Expert");

    // Assert
    assert_eq!(compare_report_order(&lower, &upper), Ordering::Less);
}

#[test]
fn given_same_name_and_title_when_ordering_then_id_breaks_tie() {
    // Arrange
    let a = person("E1", "Sam", "Engineer", "Expert");
    let b = person("E2", "Sam", "Engineer", "Expert");

    // Assert
    assert_eq!(compare_report_order(&a, &b), Ordering::Less);
    assert_eq!(compare_report_order(&b, &a), Ordering::Greater);
}

#[test]
fn given_container_and_employee_when_ordering_siblings_then_container_first() {
    // Arrange
    let container = OrgNode::container("ORG-UNIT-Z".into(), "Zulu", OrgType::Unit, &OrgPath::default());
    let employee = person("E1", "Aaron", "Engineer", "Chief");

    // Assert
    assert_eq!(compare_siblings(&container, &employee), Ordering::Less);
    assert_eq!(compare_siblings(&employee, &container), Ordering::Greater);
}

#[test]
fn given_two_containers_when_ordering_siblings_then_labels_decide() {
    // Arrange
    let a = OrgNode::container("ORG-DIV-b".into(), "beta", OrgType::Division, &OrgPath::default());
    let b = OrgNode::container("ORG-DIV-A".into(), "Alpha", OrgType::Division, &OrgPath::default());

    // Assert
    assert_eq!(compare_siblings(&a, &b), Ordering::Greater);
}
