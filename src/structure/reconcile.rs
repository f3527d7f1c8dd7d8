//! Re-attaching documentation to a freshly parsed tree by path.
//!
//! A parameter's path is the qualified identifier of its parameter group,
//! followed by `qualified_identifier + type_delimiter + qualified_type` for
//! every parameter on the way down, joined by the path delimiter. The path
//! delimiter after the group is left out when the group has no identifier;
//! such a group never takes documentation itself.

use tracing::{debug, trace, warn};

use crate::base::{Delimiters, NodeIdx};

use super::documentation::Documentation;
use super::element::ElementKind;
use super::tree::SignatureTree;

/// Result of offering a documentation to a subtree.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The documentation was appended to this node.
    Attached(NodeIdx),
    /// No node matched; the documentation is handed back.
    Unmatched(Documentation),
}

impl MatchOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, MatchOutcome::Attached(_))
    }

    pub fn attached(&self) -> Option<NodeIdx> {
        match self {
            MatchOutcome::Attached(node) => Some(*node),
            MatchOutcome::Unmatched(_) => None,
        }
    }

    pub fn into_unmatched(self) -> Option<Documentation> {
        match self {
            MatchOutcome::Attached(_) => None,
            MatchOutcome::Unmatched(doc) => Some(doc),
        }
    }
}

/// One `identifier<type>type` segment of a parameter path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPathElement {
    pub identifier: String,
    pub qualified_identifier: String,
    pub type_name: Option<String>,
    pub qualified_type_name: Option<String>,
}

/// Parse one path segment into names and types.
///
/// Unqualified names are the text after the last namespace delimiter.
pub fn parse_path_element(delimiters: &Delimiters, element: &str) -> ParameterPathElement {
    let type_delimiter = delimiters.type_delimiter();
    let split = if type_delimiter.is_empty() {
        None
    } else {
        element.split_once(type_delimiter)
    };
    match split {
        Some((name, type_name)) => ParameterPathElement {
            identifier: unqualified(delimiters, name).to_string(),
            qualified_identifier: name.to_string(),
            type_name: Some(unqualified(delimiters, type_name).to_string()),
            qualified_type_name: Some(type_name.to_string()),
        },
        None => ParameterPathElement {
            identifier: unqualified(delimiters, element).to_string(),
            qualified_identifier: element.to_string(),
            type_name: None,
            qualified_type_name: None,
        },
    }
}

/// Split a full path into its parsed segments.
pub fn split_path(delimiters: &Delimiters, path: &str) -> Vec<ParameterPathElement> {
    if path.is_empty() {
        return Vec::new();
    }
    if delimiters.path_delimiter().is_empty() {
        return vec![parse_path_element(delimiters, path)];
    }
    path.split(delimiters.path_delimiter())
        .map(|element| parse_path_element(delimiters, element))
        .collect()
}

fn unqualified<'a>(delimiters: &Delimiters, qualified: &'a str) -> &'a str {
    let namespace = delimiters.namespace_delimiter();
    if namespace.is_empty() {
        return qualified;
    }
    match qualified.rfind(namespace) {
        Some(pos) => &qualified[pos + namespace.len()..],
        None => qualified,
    }
}

fn join_path(delimiters: &Delimiters, prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{}{segment}", delimiters.path_delimiter())
    }
}

impl SignatureTree {
    fn parameter_segment(&self, delimiters: &Delimiters, node: NodeIdx) -> Option<String> {
        let element = self.get(node)?;
        let data = element.parameter_data()?;
        Some(format!(
            "{}{}{}",
            element.qualified_identifier,
            delimiters.type_delimiter(),
            data.qualified_data_type_name
        ))
    }

    /// Accumulated path of the ancestors of a parameter.
    fn prefix_for(&self, delimiters: &Delimiters, node: NodeIdx) -> String {
        let Some(parent) = self.parent(node) else {
            return String::new();
        };
        match self.get(parent).map(|element| element.kind()) {
            Some(ElementKind::Parameters { .. }) => self
                .get(parent)
                .map(|element| element.qualified_identifier.clone())
                .unwrap_or_default(),
            Some(ElementKind::Parameter { .. }) => {
                self.parameter_path(delimiters, parent).unwrap_or_default()
            }
            _ => String::new(),
        }
    }

    /// Re-derive the path of a parameter from its ancestors.
    pub fn parameter_path(&self, delimiters: &Delimiters, node: NodeIdx) -> Option<String> {
        let segment = self.parameter_segment(delimiters, node)?;
        let prefix = self.prefix_for(delimiters, node);
        Some(join_path(delimiters, &prefix, &segment))
    }

    /// Depth-first search for the first node whose path equals `key`.
    fn find_match(
        &self,
        delimiters: &Delimiters,
        node: NodeIdx,
        prefix: &str,
        key: &str,
    ) -> Option<NodeIdx> {
        let element = self.get(node)?;
        let (path, children) = match element.kind() {
            ElementKind::Parameters { parameters } => {
                let path = element.qualified_identifier.clone();
                if !path.is_empty() && path == key {
                    return Some(node);
                }
                (path, parameters)
            }
            ElementKind::Parameter { complex_type, .. } => {
                let segment = self.parameter_segment(delimiters, node)?;
                let path = join_path(delimiters, prefix, &segment);
                if path == key {
                    return Some(node);
                }
                (path, complex_type)
            }
            _ => return None,
        };

        children
            .iter()
            .find_map(|&child| self.find_match(delimiters, child, &path, key))
    }

    /// Attach `doc` to the node below `node` whose path equals its key.
    ///
    /// `node` is a parameter group or a parameter. A documentation without
    /// key is never assignable.
    pub fn add_matching_documentation(
        &mut self,
        delimiters: &Delimiters,
        node: NodeIdx,
        doc: Documentation,
    ) -> MatchOutcome {
        let Some(key) = doc
            .signature_element_identifier
            .as_deref()
            .filter(|key| !key.is_empty())
        else {
            return MatchOutcome::Unmatched(doc);
        };

        let prefix = match self.get(node).map(|element| element.kind()) {
            Some(ElementKind::Parameter { .. }) => self.prefix_for(delimiters, node),
            _ => String::new(),
        };

        match self.find_match(delimiters, node, &prefix, key) {
            Some(target) => match self.element_mut(target) {
                Some(element) => {
                    element.push_documentation(doc);
                    MatchOutcome::Attached(target)
                }
                None => MatchOutcome::Unmatched(doc),
            },
            None => MatchOutcome::Unmatched(doc),
        }
    }

    /// Offer `doc` to the input, output and exception groups of `operation`
    /// in that order.
    pub fn reconcile_operation(
        &mut self,
        delimiters: &Delimiters,
        operation: NodeIdx,
        doc: Documentation,
    ) -> MatchOutcome {
        let groups = match self.get(operation).map(|element| element.kind()) {
            Some(ElementKind::Operation { .. }) => self.children(operation),
            _ => return MatchOutcome::Unmatched(doc),
        };

        let mut doc = doc;
        for group in groups {
            match self.add_matching_documentation(delimiters, group, doc) {
                MatchOutcome::Attached(target) => return MatchOutcome::Attached(target),
                MatchOutcome::Unmatched(back) => doc = back,
            }
        }
        MatchOutcome::Unmatched(doc)
    }

    /// Reconcile every fragment over every operation of the tree.
    ///
    /// Returns the fragments that matched no node. Misses are logged and
    /// are not errors.
    pub fn reconcile(
        &mut self,
        delimiters: &Delimiters,
        docs: impl IntoIterator<Item = Documentation>,
    ) -> Vec<Documentation> {
        let operations = self.operations();
        let mut unmatched = Vec::new();

        'docs: for doc in docs {
            let mut doc = doc;
            for &operation in &operations {
                match self.reconcile_operation(delimiters, operation, doc) {
                    MatchOutcome::Attached(target) => {
                        debug!("attached documentation to {target} of operation {operation}");
                        continue 'docs;
                    }
                    MatchOutcome::Unmatched(back) => doc = back,
                }
            }
            warn!(
                "no signature element found for documentation {:?}",
                doc.signature_element_identifier
            );
            unmatched.push(doc);
        }

        unmatched
    }

    /// Store the path of `parameter` and of every nested parameter, starting
    /// from the accumulated `path` of its ancestors.
    pub fn set_parameters_paths(&mut self, delimiters: &Delimiters, path: &str, parameter: NodeIdx) {
        let Some(segment) = self.parameter_segment(delimiters, parameter) else {
            warn!("{path}  --  {parameter} is not a parameter");
            return;
        };
        let own_path = join_path(delimiters, path, &segment);
        trace!("path of {parameter}: {own_path}");

        let children = self.children(parameter);
        if let Some(data) = self.parameter_data_mut(parameter) {
            data.signature_element_path = Some(own_path.clone());
        }
        for child in children {
            self.set_parameters_paths(delimiters, &own_path, child);
        }
    }

    /// Store the path of every parameter below every operation.
    pub fn set_all_parameters_paths(&mut self, delimiters: &Delimiters) {
        for operation in self.operations() {
            for group in self.children(operation) {
                let prefix = self
                    .get(group)
                    .map(|element| element.qualified_identifier.clone())
                    .unwrap_or_default();
                for parameter in self.children(group) {
                    self.set_parameters_paths(delimiters, &prefix, parameter);
                }
            }
        }
    }
}
