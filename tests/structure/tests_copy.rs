//! Deep copy tests.

use sigdoc::Error;
use sigdoc::structure::{ElementKind, SignatureTree};

use crate::helpers::tree_fixtures::*;

fn preorder(tree: &SignatureTree, root: sigdoc::NodeIdx) -> Vec<sigdoc::NodeIdx> {
    std::iter::once(root).chain(tree.descendants(root)).collect()
}

#[test]
fn test_copy_of_operation_into_new_interface() {
    let mut f = customer_service();
    f.tree
        .add_docpart(f.customer_id, role_doc("findIn/Cust:Customer/id:int", "OBJECT", "id"))
        .unwrap();

    let mut target = SignatureTree::new();
    let artifact = target.add_artifact("Artifact", "copy.wsdl").unwrap();
    let interface = target.add_interface(artifact, "PortType", "Copy").unwrap();
    let copy = target.copy_from(&f.tree, f.operation, Some(interface)).unwrap();

    let original = preorder(&f.tree, f.operation);
    let copied = preorder(&target, copy);
    assert_eq!(original.len(), copied.len());
    assert_eq!(target.size(copy), f.tree.size(f.operation));

    for (a, b) in original.into_iter().zip(copied) {
        let (a, b) = (f.tree.get(a).unwrap(), target.get(b).unwrap());
        assert_eq!(a.id(), b.id());
        assert_eq!(a.identifier, b.identifier);
        assert_eq!(a.qualified_identifier, b.qualified_identifier);
        assert_eq!(a.category, b.category);
        assert_eq!(a.documentations(), b.documentations());
    }
}

#[test]
fn test_mutating_copy_leaves_original_alone() {
    let mut f = customer_service();
    f.tree
        .add_docpart(f.customer_id, role_doc("findIn/Cust:Customer/id:int", "OBJECT", "before"))
        .unwrap();
    let copy = f.tree.copy(f.input, None).unwrap();
    let copied_id = f.tree.descendants(copy)[1];

    let mut docs = f.tree.documentations(copied_id).to_vec();
    docs[0].set_text(developer(), "after");
    f.tree.set_documentations(copied_id, docs).unwrap();
    f.tree.add_docpart(copied_id, role_doc("x", "SOURCE", "extra")).unwrap();
    f.tree.parameter_data_mut(copied_id).unwrap().data_type_name = "long".to_string();

    let original_docs = f.tree.documentations(f.customer_id);
    assert_eq!(original_docs.len(), 1);
    assert_eq!(original_docs[0].text(&developer()), Some("before"));
    assert_eq!(
        f.tree.get(f.customer_id).unwrap().parameter_data().unwrap().data_type_name,
        "int"
    );
}

#[test]
fn test_copy_reattached_as_exception() {
    let mut f = customer_service();
    let copy = f.tree.copy(f.fault, Some(f.operation)).unwrap();
    f.tree.attach_exception(f.operation, copy).unwrap();

    match f.tree.get(f.operation).unwrap().kind() {
        ElementKind::Operation { exceptions, .. } => assert_eq!(exceptions, &vec![f.fault, copy]),
        other => panic!("expected an operation, got {other:?}"),
    }
}

#[test]
fn test_copy_with_incompatible_parent_fails() {
    let mut f = customer_service();
    let before = f.tree.len();
    let err = f.tree.copy(f.operation, Some(f.input)).unwrap_err();

    assert!(matches!(
        err,
        Error::IncompatibleParent {
            parent: "Parameters",
            child: "Operation"
        }
    ));
    assert_eq!(f.tree.len(), before);
}

#[test]
fn test_copy_of_artifact_becomes_root() {
    let mut f = customer_service();
    let copy = f.tree.copy(f.artifact, None).unwrap();
    assert_eq!(f.tree.roots(), &[f.artifact, copy]);
    assert_eq!(f.tree.operations().len(), 2);
}
