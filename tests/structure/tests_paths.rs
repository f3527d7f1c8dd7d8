//! Parameter path tests.

use rstest::rstest;
use sigdoc::Delimiters;
use sigdoc::structure::split_path;

use crate::helpers::tree_fixtures::*;

#[rstest]
#[case::java(Delimiters::java(), "findIn/Cust:Customer/id:int")]
#[case::wsdl(Delimiters::wsdl(), "findIn;Cust+Customer;id+int")]
fn test_stored_paths_follow_delimiters(#[case] delimiters: Delimiters, #[case] expected: &str) {
    let mut f = customer_service();
    f.tree.set_all_parameters_paths(&delimiters);
    let stored = f
        .tree
        .get(f.customer_id)
        .and_then(|e| e.parameter_data())
        .and_then(|d| d.signature_element_path.as_deref());
    assert_eq!(stored, Some(expected));
}

#[test]
fn test_every_stored_path_can_be_rederived() {
    let mut f = customer_service();
    let delimiters = Delimiters::wsdl();
    f.tree.set_all_parameters_paths(&delimiters);

    let mut checked = 0;
    for (idx, element) in f.tree.iter() {
        let Some(data) = element.parameter_data() else {
            continue;
        };
        assert_eq!(data.signature_element_path, f.tree.parameter_path(&delimiters, idx));
        checked += 1;
    }
    assert_eq!(checked, 6);
}

#[test]
fn test_stored_path_is_a_reconciliation_key() {
    let mut f = customer_service();
    let delimiters = slash_delimiters();
    f.tree.set_all_parameters_paths(&delimiters);
    let key = f.tree.parameter_path(&delimiters, f.fault_id).unwrap();

    let outcome = f
        .tree
        .reconcile_operation(&delimiters, f.operation, role_doc(&key, "OBJECT", "x"));
    assert_eq!(outcome.attached(), Some(f.fault_id));
}

#[test]
fn test_split_path_with_namespaces() {
    let delimiters = Delimiters::wsdl();
    let parts = split_path(&delimiters, "findIn;tns#Cust+xsd#Customer;id+xsd#int");

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[1].identifier, "Cust");
    assert_eq!(parts[1].qualified_identifier, "tns#Cust");
    assert_eq!(parts[1].type_name.as_deref(), Some("Customer"));
    assert_eq!(parts[2].qualified_type_name.as_deref(), Some("xsd#int"));
    assert_eq!(parts[0].type_name, None);
}
