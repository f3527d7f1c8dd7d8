//! Signature trees shaped like the output of the WSDL and Java parsers.

use std::sync::Arc;

use sigdoc::structure::{Addressee, Documentation, Numerus, SignatureTree, ThematicRole};
use sigdoc::{Delimiters, NodeIdx};

/// `test.wsdl` with one port type and a `findCustomerByName` operation:
///
/// ```text
/// findIn                 (input)
///   Cust: Customer
///     id: int
///     name: String
/// findOut                (output)
///   id: int
/// NotFound               (exception)
///   Cust: Customer
///     id: int
/// ```
pub struct CustomerService {
    pub tree: SignatureTree,
    pub artifact: NodeIdx,
    pub interface: NodeIdx,
    pub operation: NodeIdx,
    pub input: NodeIdx,
    pub customer: NodeIdx,
    pub customer_id: NodeIdx,
    pub customer_name: NodeIdx,
    pub output: NodeIdx,
    pub output_id: NodeIdx,
    pub fault: NodeIdx,
    pub fault_id: NodeIdx,
}

pub fn customer_service() -> CustomerService {
    let mut tree = SignatureTree::new();
    let artifact = tree.add_artifact("Artifact", "test.wsdl").unwrap();
    let interface = tree
        .add_interface(artifact, "PortType", "CustomerService")
        .unwrap();
    let operation = tree
        .add_operation(interface, "Operation", "findCustomerByName")
        .unwrap();

    let input = tree
        .set_input_parameters(operation, "InputMessage", "findIn")
        .unwrap();
    let customer = tree.add_parameter(input, "Part", "Cust", "Customer").unwrap();
    let customer_id = tree.add_parameter(customer, "Element", "id", "int").unwrap();
    let customer_name = tree
        .add_parameter(customer, "Element", "name", "String")
        .unwrap();

    let output = tree
        .set_output_parameters(operation, "OutputMessage", "findOut")
        .unwrap();
    let output_id = tree.add_parameter(output, "Part", "id", "int").unwrap();

    let fault = tree.add_exception(operation, "Fault", "NotFound").unwrap();
    let fault_customer = tree.add_parameter(fault, "Part", "Cust", "Customer").unwrap();
    let fault_id = tree
        .add_parameter(fault_customer, "Element", "id", "int")
        .unwrap();

    CustomerService {
        tree,
        artifact,
        interface,
        operation,
        input,
        customer,
        customer_id,
        customer_name,
        output,
        output_id,
        fault,
        fault_id,
    }
}

/// Java-style delimiters: `/` between path elements, `:` before types.
pub fn slash_delimiters() -> Delimiters {
    Delimiters::new("/", ":", ".")
}

pub fn developer() -> Addressee {
    Addressee::new("Developer")
}

/// A documentation for `path` tagged with `role`.
pub fn role_doc(path: &str, role: &str, text: &str) -> Documentation {
    Documentation::for_path(path)
        .with_role(Arc::new(ThematicRole::new(role)))
        .with_text(developer(), text)
}

/// Tag `node` with `role` and set its numerus.
pub fn tag(tree: &mut SignatureTree, node: NodeIdx, role: &str, numerus: Numerus) {
    tree.element_mut(node).unwrap().numerus = numerus;
    tree.add_docpart(node, Documentation::new().with_role(Arc::new(ThematicRole::new(role))))
        .unwrap();
}
