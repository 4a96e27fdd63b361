//! Tests for the reporting-line forest and the node arena underneath it

use orgchart::domain::{
    flatten, EmployeeRecord, NodeArena, OrgNode, RecordClassifier, ReportingTreeBuilder,
};

fn record(id: &str, name: &str, title: &str, supervisor: &str) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id.into(),
        name: name.into(),
        position: "Staff".into(),
        corporate_title: title.into(),
        supervisor_id: supervisor.into(),
        ..EmployeeRecord::default()
    }
}

fn build(records: &[EmployeeRecord]) -> Vec<OrgNode> {
    let nodes = RecordClassifier::default().classify_all(records);
    ReportingTreeBuilder::new().build(nodes)
}

fn child_ids(node: &OrgNode) -> Vec<&str> {
    node.children.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn given_manager_links_when_building_then_reports_nest_under_manager() {
    // Act
    let forest = build(&[
        record("E1", "Boss", "Chief", ""),
        record("E2", "Zoe", "Professional", "E1"),
        record("E3", "Adam", "Professional", "E1"),
        record("E4", "Lead", "Team Lead", "E1"),
    ]);

    // Assert
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, "E1");
    assert_eq!(child_ids(&forest[0]), vec!["E4", "E3", "E2"]);
}

#[test]
fn given_unknown_manager_when_building_then_node_becomes_root() {
    // Act
    let forest = build(&[
        record("E1", "Boss", "Chief", ""),
        record("E2", "Orphan", "Staff", "NOPE"),
    ]);

    // Assert
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[1].id, "E2");
    assert_eq!(forest[1].manager_id.as_deref(), Some("NOPE"));
}

#[test]
fn given_manager_cycle_when_building_then_every_node_appears_once() {
    // Act
    let forest = build(&[
        record("E1", "Ann", "Staff", "E3"),
        record("E2", "Ben", "Staff", "E1"),
        record("E3", "Cid", "Staff", "E2"),
    ]);

    // Assert
    let all = flatten(&forest);
    let mut ids: Vec<&str> = all.iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["E1", "E2", "E3"]);
    assert_eq!(forest.len(), 1, "the link closing the cycle is refused");
}

#[test]
fn given_self_reference_when_building_then_node_is_root() {
    // Act
    let forest = build(&[record("E1", "Ann", "Staff", "E1")]);

    // Assert
    assert_eq!(forest.len(), 1);
    assert!(forest[0].children.is_empty());
}

#[test]
fn given_same_input_when_building_twice_then_forests_are_equal() {
    // Arrange
    let records = vec![
        record("E1", "Boss", "Chief", ""),
        record("E2", "Zoe", "Expert", "E1"),
        record("E3", "Yan", "Expert", "E1"),
        record("E4", "Xia", "Staff", "E2"),
    ];

    // Assert
    assert_eq!(build(&records), build(&records));
}

#[test]
fn given_arena_when_attaching_ancestor_under_descendant_then_link_is_refused() {
    // Arrange
    let nodes = RecordClassifier::default().classify_all(&[
        record("E1", "Ann", "Staff", ""),
        record("E2", "Ben", "Staff", ""),
    ]);
    let mut arena = NodeArena::new();
    assert!(arena.is_empty());
    let a = arena.insert_node(nodes[0].clone());
    let b = arena.insert_node(nodes[1].clone());

    // Act
    let linked = arena.attach(b, a);
    let reversed = arena.attach(a, b);
    let looped = arena.attach(a, a);

    // Assert
    assert!(linked);
    assert!(!reversed);
    assert!(!looped);
    assert_eq!(arena.roots(), vec![a]);
    assert_eq!(arena.len(), 2);
}
