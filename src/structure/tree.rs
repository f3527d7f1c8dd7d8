//! Arena storage for signature element trees.

use tracing::trace;

use crate::base::{ElementId, IdCounter, NodeIdx};
use crate::error::{Error, Result};

use super::documentation::Documentation;
use super::element::{ElementKind, ParameterData, SignatureElement};

/// An arena owning every signature element of one parse session.
///
/// Parents list their children by [`NodeIdx`]; children point back through
/// [`SignatureElement::parent`]. A tree may hold several artifact roots.
#[derive(Debug, Clone, Default)]
pub struct SignatureTree {
    nodes: Vec<SignatureElement>,
    roots: Vec<NodeIdx>,
    ids: IdCounter,
}

impl SignatureTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree that continues numbering with `ids`.
    pub fn with_counter(ids: IdCounter) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    /// Hand the id counter back, e.g. to seed the next session.
    pub fn into_counter(self) -> IdCounter {
        self.ids
    }

    // ============================================================================
    // CONSTRUCTION
    // ============================================================================

    fn push(
        &mut self,
        parent: Option<NodeIdx>,
        category: impl Into<String>,
        identifier: impl Into<String>,
        kind: ElementKind,
    ) -> Result<NodeIdx> {
        let id = self.ids.next_id().ok_or(Error::IdsExhausted)?;
        Ok(self.push_element(SignatureElement::new(
            id, parent, category, identifier, kind,
        )))
    }

    fn push_element(&mut self, element: SignatureElement) -> NodeIdx {
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(element);
        idx
    }

    pub(crate) fn element(&self, node: NodeIdx) -> Result<&SignatureElement> {
        self.nodes.get(node.index()).ok_or(Error::UnknownNode(node))
    }

    fn kind_mut(&mut self, node: NodeIdx) -> Result<&mut ElementKind> {
        self.nodes
            .get_mut(node.index())
            .map(SignatureElement::kind_mut)
            .ok_or(Error::UnknownNode(node))
    }

    fn incompatible(&self, parent: NodeIdx, child: &ElementKind) -> Result<Error> {
        Ok(Error::IncompatibleParent {
            parent: self.element(parent)?.kind().name(),
            child: child.name(),
        })
    }

    /// Add an artifact root.
    pub fn add_artifact(
        &mut self,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let idx = self.push(
            None,
            category,
            identifier,
            ElementKind::Artifact {
                interfaces: Vec::new(),
            },
        )?;
        self.roots.push(idx);
        Ok(idx)
    }

    /// Add an interface under an artifact, or an inner interface under an
    /// interface.
    pub fn add_interface(
        &mut self,
        parent: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let kind = ElementKind::Interface {
            operations: Vec::new(),
            inner_interfaces: Vec::new(),
        };
        if !self.element(parent)?.kind().can_own(&kind) {
            return Err(self.incompatible(parent, &kind)?);
        }
        let idx = self.push(Some(parent), category, identifier, kind)?;
        self.link_child(parent, idx)?;
        Ok(idx)
    }

    /// Add an operation under an interface.
    pub fn add_operation(
        &mut self,
        parent: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let kind = ElementKind::Operation {
            input: None,
            output: None,
            exceptions: Vec::new(),
            thematic_grid_name: None,
        };
        if !self.element(parent)?.kind().can_own(&kind) {
            return Err(self.incompatible(parent, &kind)?);
        }
        let idx = self.push(Some(parent), category, identifier, kind)?;
        self.link_child(parent, idx)?;
        Ok(idx)
    }

    fn add_parameters(
        &mut self,
        operation: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let kind = ElementKind::Parameters {
            parameters: Vec::new(),
        };
        if !self.element(operation)?.is_operation() {
            return Err(self.incompatible(operation, &kind)?);
        }
        self.push(Some(operation), category, identifier, kind)
    }

    /// Create the input parameter group of an operation, replacing any
    /// previous one. A replaced group stays in the arena, detached.
    pub fn set_input_parameters(
        &mut self,
        operation: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let idx = self.add_parameters(operation, category, identifier)?;
        self.attach_input(operation, idx)?;
        Ok(idx)
    }

    /// Create the output parameter group of an operation, replacing any
    /// previous one.
    pub fn set_output_parameters(
        &mut self,
        operation: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let idx = self.add_parameters(operation, category, identifier)?;
        self.attach_output(operation, idx)?;
        Ok(idx)
    }

    /// Append an exception parameter group to an operation.
    pub fn add_exception(
        &mut self,
        operation: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<NodeIdx> {
        let idx = self.add_parameters(operation, category, identifier)?;
        self.attach_exception(operation, idx)?;
        Ok(idx)
    }

    /// Add a parameter to a parameter group or to a complex-typed parameter.
    pub fn add_parameter(
        &mut self,
        parent: NodeIdx,
        category: impl Into<String>,
        identifier: impl Into<String>,
        data_type_name: impl Into<String>,
    ) -> Result<NodeIdx> {
        let kind = ElementKind::Parameter {
            data: ParameterData::new(data_type_name),
            complex_type: Vec::new(),
        };
        if !self.element(parent)?.kind().can_own(&kind) {
            return Err(self.incompatible(parent, &kind)?);
        }
        let idx = self.push(Some(parent), category, identifier, kind)?;
        self.link_child(parent, idx)?;
        Ok(idx)
    }

    // ============================================================================
    // ATTACHING
    // ============================================================================

    fn link_child(&mut self, parent: NodeIdx, child: NodeIdx) -> Result<()> {
        let child_is_interface = matches!(self.element(child)?.kind(), ElementKind::Interface { .. });
        match self.kind_mut(parent)? {
            ElementKind::Artifact { interfaces } => interfaces.push(child),
            ElementKind::Interface {
                inner_interfaces, ..
            } if child_is_interface => inner_interfaces.push(child),
            ElementKind::Interface { operations, .. } => operations.push(child),
            ElementKind::Parameters { parameters } => parameters.push(child),
            ElementKind::Parameter { complex_type, .. } => complex_type.push(child),
            ElementKind::Operation { .. } => {
                return Err(Error::invalid_argument(
                    "operations own parameter groups through input, output or exception slots",
                ));
            }
        }
        Ok(())
    }

    /// Validate and re-parent `child` under `parent`.
    fn adopt(&mut self, parent: NodeIdx, child: NodeIdx) -> Result<()> {
        if parent == child || self.descendants(child).contains(&parent) {
            return Err(Error::invalid_argument(format!(
                "{parent} cannot own its own ancestor {child}"
            )));
        }
        let current = self.element(child)?.parent();
        if current.is_some_and(|p| p != parent) || self.children(parent).contains(&child) {
            return Err(Error::invalid_argument(format!("{child} is already attached")));
        }
        let child_kind = self.element(child)?.kind();
        if !self.element(parent)?.kind().can_own(child_kind) {
            return Err(self.incompatible(parent, child_kind)?);
        }
        self.nodes[child.index()].set_parent(Some(parent));
        self.roots.retain(|&root| root != child);
        Ok(())
    }

    /// Attach a detached node to an artifact, interface, parameter group or
    /// parameter.
    pub fn attach_child(&mut self, parent: NodeIdx, child: NodeIdx) -> Result<()> {
        if self.element(parent)?.is_operation() {
            return Err(Error::invalid_argument(
                "use attach_input, attach_output or attach_exception for operations",
            ));
        }
        self.adopt(parent, child)?;
        self.link_child(parent, child)
    }

    pub fn attach_input(&mut self, operation: NodeIdx, group: NodeIdx) -> Result<()> {
        self.adopt(operation, group)?;
        let previous = match self.kind_mut(operation)? {
            ElementKind::Operation { input, .. } => input.replace(group),
            _ => None,
        };
        self.detach(previous, group);
        Ok(())
    }

    pub fn attach_output(&mut self, operation: NodeIdx, group: NodeIdx) -> Result<()> {
        self.adopt(operation, group)?;
        let previous = match self.kind_mut(operation)? {
            ElementKind::Operation { output, .. } => output.replace(group),
            _ => None,
        };
        self.detach(previous, group);
        Ok(())
    }

    pub fn attach_exception(&mut self, operation: NodeIdx, group: NodeIdx) -> Result<()> {
        self.adopt(operation, group)?;
        if let ElementKind::Operation { exceptions, .. } = self.kind_mut(operation)? {
            exceptions.push(group);
        }
        Ok(())
    }

    fn detach(&mut self, previous: Option<NodeIdx>, replacement: NodeIdx) {
        let node = previous.filter(|&n| n != replacement);
        if let Some(element) = node.and_then(|n| self.nodes.get_mut(n.index())) {
            element.set_parent(None);
        }
    }

    // ============================================================================
    // COPYING
    // ============================================================================

    fn check_copy_parent(&self, child: &ElementKind, new_parent: Option<NodeIdx>) -> Result<()> {
        let Some(parent) = new_parent else {
            return Ok(());
        };
        if self.element(parent)?.kind().can_own(child) {
            Ok(())
        } else {
            Err(self.incompatible(parent, child)?)
        }
    }

    /// Deep copy of the subtree at `node` inside this tree.
    ///
    /// Ids, identifiers, categories, flags and parameter data are kept;
    /// documentation sequences are deep copies. The returned root records
    /// `new_parent` as its parent but is not yet listed among its children;
    /// use the `attach_*` methods for that.
    pub fn copy(&mut self, node: NodeIdx, new_parent: Option<NodeIdx>) -> Result<NodeIdx> {
        self.check_copy_parent(self.element(node)?.kind(), new_parent)?;
        let root = self.copy_within(node, new_parent);
        self.register_copy_root(root);
        trace!("copied {node} to {root}");
        Ok(root)
    }

    /// Deep copy of the subtree at `node` of `source` into this tree.
    pub fn copy_from(
        &mut self,
        source: &SignatureTree,
        node: NodeIdx,
        new_parent: Option<NodeIdx>,
    ) -> Result<NodeIdx> {
        self.check_copy_parent(source.element(node)?.kind(), new_parent)?;
        let root = self.copy_across(source, node, new_parent);
        self.register_copy_root(root);
        Ok(root)
    }

    fn register_copy_root(&mut self, root: NodeIdx) {
        let element = &self.nodes[root.index()];
        if element.parent().is_none() && matches!(element.kind(), ElementKind::Artifact { .. }) {
            self.roots.push(root);
        }
    }

    fn copy_within(&mut self, node: NodeIdx, parent: Option<NodeIdx>) -> NodeIdx {
        let copied = copy_element(&self.nodes[node.index()], parent);
        let kind = copied.kind().clone();
        let idx = self.push_element(copied);
        let kind = kind.map_children(|child| self.copy_within(child, Some(idx)));
        self.nodes[idx.index()].set_kind(kind);
        idx
    }

    fn copy_across(&mut self, source: &SignatureTree, node: NodeIdx, parent: Option<NodeIdx>) -> NodeIdx {
        let copied = copy_element(&source.nodes[node.index()], parent);
        let kind = copied.kind().clone();
        let idx = self.push_element(copied);
        let kind = kind.map_children(|child| self.copy_across(source, child, Some(idx)));
        self.nodes[idx.index()].set_kind(kind);
        idx
    }

    // ============================================================================
    // DOCUMENTATION
    // ============================================================================

    /// Append a documentation, promoting the shared empty sequence to an
    /// owned one on first write.
    pub fn add_docpart(&mut self, node: NodeIdx, doc: Documentation) -> Result<()> {
        self.nodes
            .get_mut(node.index())
            .ok_or(Error::UnknownNode(node))?
            .push_documentation(doc);
        Ok(())
    }

    pub fn set_documentations(&mut self, node: NodeIdx, docs: Vec<Documentation>) -> Result<()> {
        self.nodes
            .get_mut(node.index())
            .ok_or(Error::UnknownNode(node))?
            .replace_documentations(docs);
        Ok(())
    }

    /// Documentations of `node`; empty for unknown nodes.
    pub fn documentations(&self, node: NodeIdx) -> &[Documentation] {
        self.get(node)
            .map(SignatureElement::documentations)
            .unwrap_or(&[])
    }

    // ============================================================================
    // QUERIES
    // ============================================================================

    pub fn get(&self, node: NodeIdx) -> Option<&SignatureElement> {
        self.nodes.get(node.index())
    }

    pub fn element_mut(&mut self, node: NodeIdx) -> Option<&mut SignatureElement> {
        self.nodes.get_mut(node.index())
    }

    pub fn parameter_data_mut(&mut self, node: NodeIdx) -> Option<&mut ParameterData> {
        self.element_mut(node)?.parameter_data_mut()
    }

    pub fn id(&self, node: NodeIdx) -> Option<ElementId> {
        self.get(node).map(SignatureElement::id)
    }

    pub fn parent(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.get(node)?.parent()
    }

    /// Children in declaration order.
    pub fn children(&self, node: NodeIdx) -> Vec<NodeIdx> {
        self.get(node)
            .map(|element| element.kind().children())
            .unwrap_or_default()
    }

    /// All nodes below `node` in pre-order, excluding `node`.
    pub fn descendants(&self, node: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeIdx> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// `Σ(size(child) + 1)` over the children of `node`. Leaves, unknown
    /// nodes and `None` have size 0.
    pub fn size(&self, node: impl Into<Option<NodeIdx>>) -> usize {
        let Some(node) = node.into() else {
            return 0;
        };
        self.children(node)
            .into_iter()
            .map(|child| self.size(child) + 1)
            .sum()
    }

    /// Node count of the subtree at `node`, including `node`.
    pub fn subtree_len(&self, node: NodeIdx) -> usize {
        if self.get(node).is_some() {
            self.size(node) + 1
        } else {
            0
        }
    }

    /// Every operation reachable from the roots, in pre-order.
    pub fn operations(&self) -> Vec<NodeIdx> {
        self.roots
            .iter()
            .flat_map(|&root| self.descendants(root))
            .filter(|&node| self.nodes[node.index()].is_operation())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &SignatureElement)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, element)| (NodeIdx::new(index), element))
    }

    pub fn roots(&self) -> &[NodeIdx] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn copy_element(source: &SignatureElement, parent: Option<NodeIdx>) -> SignatureElement {
    let mut copied = source.clone();
    copied.set_parent(parent);
    copied.set_copied_documentations(source.copied_documentations());
    copied
}
