//! Reconciliation tests: documentation written against one parse must find
//! the same logical node in the next parse.

use rstest::rstest;
use sigdoc::structure::{Documentation, MatchOutcome};

use crate::helpers::tree_fixtures::*;

// =============================================================================
// EXACT PATH MATCHING
// =============================================================================

#[test]
fn test_nested_path_matches_only_the_input_id() {
    let mut f = customer_service();
    let delimiters = slash_delimiters();

    let outcome = f.tree.reconcile_operation(
        &delimiters,
        f.operation,
        role_doc("findIn/Cust:Customer/id:int", "OBJECT", "customer id"),
    );

    assert_eq!(outcome, MatchOutcome::Attached(f.customer_id));
    assert_eq!(f.tree.documentations(f.customer_id).len(), 1);
    // another `id: int` sits below a differently named root
    assert!(f.tree.documentations(f.output_id).is_empty());
    assert!(f.tree.documentations(f.fault_id).is_empty());
}

#[rstest]
#[case::output("findOut/id:int")]
#[case::exception("NotFound/Cust:Customer/id:int")]
fn test_same_leaf_reached_through_its_own_root(#[case] path: &str) {
    let mut f = customer_service();
    let unmatched = f
        .tree
        .reconcile(&slash_delimiters(), vec![role_doc(path, "RESULT", "x")]);
    assert!(unmatched.is_empty());

    let target = if path.starts_with("findOut") {
        f.output_id
    } else {
        f.fault_id
    };
    assert_eq!(f.tree.documentations(target).len(), 1);
    assert!(f.tree.documentations(f.customer_id).is_empty());
}

#[test]
fn test_group_path_attaches_to_group() {
    let mut f = customer_service();
    let outcome = f.tree.add_matching_documentation(
        &slash_delimiters(),
        f.input,
        Documentation::for_path("findIn"),
    );
    assert_eq!(outcome.attached(), Some(f.input));
}

#[test]
fn test_type_is_part_of_the_key() {
    let mut f = customer_service();
    let outcome = f.tree.add_matching_documentation(
        &slash_delimiters(),
        f.input,
        Documentation::for_path("findIn/Cust:Customer/id:long"),
    );
    assert!(matches!(outcome, MatchOutcome::Unmatched(_)));
}

// =============================================================================
// RE-PARSE
// =============================================================================

#[test]
fn test_reconcile_after_reparse_reattaches_to_equivalent_node() {
    let delimiters = slash_delimiters();
    let mut first = customer_service();
    first.tree.set_all_parameters_paths(&delimiters);

    // export: the stored path of the node is the reconciliation key
    let key = first
        .tree
        .get(first.customer_name)
        .and_then(|e| e.parameter_data())
        .and_then(|d| d.signature_element_path.clone())
        .unwrap();
    assert_eq!(key, "findIn/Cust:Customer/name:String");
    let doc = role_doc(&key, "OBJECT", "the name to search for");
    first.tree.add_docpart(first.customer_name, doc.copy()).unwrap();

    // the next parse numbers everything afresh
    let mut second = customer_service();
    let unmatched = second.tree.reconcile(&delimiters, vec![doc]);

    assert!(unmatched.is_empty());
    let attached = second.tree.documentations(second.customer_name);
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].text(&developer()), Some("the name to search for"));

    let attached_elsewhere = second
        .tree
        .iter()
        .filter(|(idx, e)| *idx != second.customer_name && !e.documentations().is_empty())
        .count();
    assert_eq!(attached_elsewhere, 0);
}

#[test]
fn test_reconcile_keeps_misses_and_continues() {
    let mut f = customer_service();
    let docs = vec![
        role_doc("findIn/Cust:Customer/age:int", "OBJECT", "gone"),
        role_doc("findOut/id:int", "RESULT", "kept"),
        Documentation::new(),
    ];

    let unmatched = f.tree.reconcile(&slash_delimiters(), docs);

    assert_eq!(unmatched.len(), 2);
    assert_eq!(
        unmatched[0].signature_element_identifier.as_deref(),
        Some("findIn/Cust:Customer/age:int")
    );
    assert_eq!(unmatched[1].signature_element_identifier, None);
    assert_eq!(f.tree.documentations(f.output_id).len(), 1);
}

#[test]
fn test_first_match_wins_for_repeated_names() {
    let mut f = customer_service();
    // a second `Cust: Customer` part in the same message
    let twin = f.tree.add_parameter(f.input, "Part", "Cust", "Customer").unwrap();
    let twin_id = f.tree.add_parameter(twin, "Element", "id", "int").unwrap();

    let outcome = f.tree.reconcile_operation(
        &slash_delimiters(),
        f.operation,
        Documentation::for_path("findIn/Cust:Customer/id:int"),
    );
    assert_eq!(outcome.attached(), Some(f.customer_id));
    assert!(f.tree.documentations(twin_id).is_empty());
}
