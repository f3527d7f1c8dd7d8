//! Upward and downward searches over a signature tree.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::base::NodeIdx;
use crate::core::text_utils::extract_verb;

use super::element::{ElementKind, ParameterType};
use super::thematic::{ThematicRole, ThematicRoleContext};
use super::tree::SignatureTree;

impl SignatureTree {
    /// The operation enclosing `node`, or `node` itself if it is one.
    /// `None` once a root is passed without meeting an operation.
    pub fn find_operation_for_parameter(&self, node: NodeIdx) -> Option<NodeIdx> {
        let mut current = Some(node);
        while let Some(idx) = current {
            let element = self.get(idx)?;
            if element.is_operation() {
                return Some(idx);
            }
            current = element.parent();
        }
        None
    }

    /// The nearest interface at or above `node`.
    pub fn enclosing_interface(&self, node: NodeIdx) -> Option<NodeIdx> {
        let mut current = Some(node);
        while let Some(idx) = current {
            let element = self.get(idx)?;
            if matches!(element.kind(), ElementKind::Interface { .. }) {
                return Some(idx);
            }
            current = element.parent();
        }
        None
    }

    /// Classify `target` as input, output or exception parameter of the
    /// operation enclosing `context`.
    ///
    /// Matches on node identity: a structurally equal parameter elsewhere in
    /// the operation is a different parameter.
    pub fn find_parameter_type(&self, target: NodeIdx, context: NodeIdx) -> ParameterType {
        let Some(target_element) = self.get(target) else {
            return ParameterType::None;
        };
        if !target_element.is_parameter_like() {
            return ParameterType::None;
        }
        let Some(ElementKind::Operation {
            input,
            output,
            exceptions,
            ..
        }) = self
            .find_operation_for_parameter(context)
            .and_then(|op| self.get(op))
            .map(|op| op.kind())
        else {
            return ParameterType::None;
        };

        if input.is_some_and(|group| self.subtree_contains(group, target)) {
            ParameterType::Input
        } else if output.is_some_and(|group| self.subtree_contains(group, target)) {
            ParameterType::Output
        } else if exceptions
            .iter()
            .any(|&group| self.subtree_contains(group, target))
        {
            ParameterType::Exception
        } else {
            ParameterType::None
        }
    }

    fn subtree_contains(&self, root: NodeIdx, target: NodeIdx) -> bool {
        root == target || self.descendants(root).contains(&target)
    }

    /// Add every role already used around the operation of `node`.
    ///
    /// Walks up from the operation's parent through the enclosing
    /// interfaces, stopping before the artifact, then down through the
    /// operation and all its parameter groups.
    pub fn collect_associated_thematic_roles(
        &self,
        node: NodeIdx,
        roles: &mut BTreeSet<Arc<ThematicRole>>,
    ) {
        let Some(operation) = self.find_operation_for_parameter(node) else {
            return;
        };

        for interface in self.interfaces_above(operation) {
            self.collect_roles_from_docs(interface, roles);
        }

        self.collect_roles_from_docs(operation, roles);
        for below in self.descendants(operation) {
            self.collect_roles_from_docs(below, roles);
        }
    }

    fn collect_roles_from_docs(&self, node: NodeIdx, roles: &mut BTreeSet<Arc<ThematicRole>>) {
        let found = self
            .documentations(node)
            .iter()
            .filter_map(|doc| doc.thematic_role.clone());
        roles.extend(found);
    }

    /// Ancestors of `node` up to, but excluding, the artifact.
    fn interfaces_above(&self, node: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(idx) = current {
            let Some(element) = self.get(idx) else {
                break;
            };
            if matches!(element.kind(), ElementKind::Artifact { .. }) {
                break;
            }
            out.push(idx);
            current = element.parent();
        }
        out
    }

    /// The role contexts the rule predicates see for `operation`.
    ///
    /// One context per role-tagged documentation on the operation or its
    /// parameter subtrees, followed by those on enclosing interfaces. All
    /// contexts carry the verb of the operation identifier.
    pub fn thematic_role_contexts(&self, operation: NodeIdx) -> Vec<ThematicRoleContext> {
        let Some(op) = self.get(operation) else {
            return Vec::new();
        };
        let predicate = extract_verb(&op.identifier);

        let mut nodes = vec![operation];
        nodes.extend(self.descendants(operation));

        let mut contexts = Vec::new();
        for node in nodes {
            self.push_contexts(node, false, &predicate, &mut contexts);
        }
        for interface in self.interfaces_above(operation) {
            self.push_contexts(interface, true, &predicate, &mut contexts);
        }
        contexts
    }

    fn push_contexts(
        &self,
        node: NodeIdx,
        interface_level: bool,
        predicate: &Option<String>,
        out: &mut Vec<ThematicRoleContext>,
    ) {
        let Some(element) = self.get(node) else {
            return;
        };
        let nested = matches!(
            element.kind(),
            ElementKind::Parameter { complex_type, .. } if !complex_type.is_empty()
        );

        for doc in element.documentations() {
            if let Some(role) = doc.role_name() {
                out.push(ThematicRoleContext {
                    role: role.to_string(),
                    numerus: element.numerus,
                    has_public_accessible_attributes: element.has_public_accessible_attributes
                        || nested,
                    interface_level,
                    predicate: predicate.clone(),
                });
            }
        }
    }

    /// Whether the operation or any node below it has edited documentation.
    pub fn is_operations_doc_changed(&self, operation: NodeIdx) -> bool {
        std::iter::once(operation)
            .chain(self.descendants(operation))
            .filter_map(|node| self.get(node))
            .any(|element| element.documentation_changed)
    }
}
