//! Signature elements: the node type of a [`SignatureTree`](super::SignatureTree).

use std::borrow::Cow;
use std::fmt;

use crate::base::{ElementId, NodeIdx};

use super::documentation::Documentation;

/// Grammatical number of a signature element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Numerus {
    #[default]
    Singular,
    Plural,
}

impl Numerus {
    pub fn is_plural(self) -> bool {
        matches!(self, Numerus::Plural)
    }
}

impl fmt::Display for Numerus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numerus::Singular => f.write_str("SINGULAR"),
            Numerus::Plural => f.write_str("PLURAL"),
        }
    }
}

/// Position of a parameter inside its operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    Input,
    Output,
    Exception,
    None,
}

/// Type information carried by a [`ElementKind::Parameter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterData {
    pub data_type_name: String,
    pub qualified_data_type_name: String,
    /// The reconciliation key, filled by
    /// [`set_parameters_paths`](super::SignatureTree::set_parameters_paths).
    pub signature_element_path: Option<String>,
}

impl ParameterData {
    pub fn new(data_type_name: impl Into<String>) -> Self {
        let data_type_name = data_type_name.into();
        Self {
            qualified_data_type_name: data_type_name.clone(),
            data_type_name,
            signature_element_path: None,
        }
    }
}

/// Variant-specific part of a signature element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Artifact {
        interfaces: Vec<NodeIdx>,
    },
    Interface {
        operations: Vec<NodeIdx>,
        inner_interfaces: Vec<NodeIdx>,
    },
    Operation {
        input: Option<NodeIdx>,
        output: Option<NodeIdx>,
        exceptions: Vec<NodeIdx>,
        /// Name of the thematic grid pinned to this operation.
        thematic_grid_name: Option<String>,
    },
    Parameters {
        parameters: Vec<NodeIdx>,
    },
    Parameter {
        data: ParameterData,
        /// Nested parameters of a complex type.
        complex_type: Vec<NodeIdx>,
    },
}

impl ElementKind {
    /// Variant name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Artifact { .. } => "Artifact",
            ElementKind::Interface { .. } => "Interface",
            ElementKind::Operation { .. } => "Operation",
            ElementKind::Parameters { .. } => "Parameters",
            ElementKind::Parameter { .. } => "Parameter",
        }
    }

    /// Children in declaration order.
    ///
    /// Interfaces list their operations before inner interfaces; operations
    /// list input, output, then exceptions.
    pub fn children(&self) -> Vec<NodeIdx> {
        match self {
            ElementKind::Artifact { interfaces } => interfaces.clone(),
            ElementKind::Interface {
                operations,
                inner_interfaces,
            } => operations.iter().chain(inner_interfaces).copied().collect(),
            ElementKind::Operation {
                input,
                output,
                exceptions,
                ..
            } => input
                .iter()
                .chain(output.iter())
                .chain(exceptions)
                .copied()
                .collect(),
            ElementKind::Parameters { parameters } => parameters.clone(),
            ElementKind::Parameter { complex_type, .. } => complex_type.clone(),
        }
    }

    /// Rewrite every child index through `f`, keeping the variant shape.
    pub fn map_children(&self, mut f: impl FnMut(NodeIdx) -> NodeIdx) -> ElementKind {
        let mut map_all = |nodes: &[NodeIdx]| nodes.iter().map(|&n| f(n)).collect::<Vec<_>>();
        match self {
            ElementKind::Artifact { interfaces } => ElementKind::Artifact {
                interfaces: map_all(interfaces),
            },
            ElementKind::Interface {
                operations,
                inner_interfaces,
            } => ElementKind::Interface {
                operations: map_all(operations),
                inner_interfaces: map_all(inner_interfaces),
            },
            ElementKind::Operation {
                input,
                output,
                exceptions,
                thematic_grid_name,
            } => {
                let input = input.map(|n| map_all(&[n])[0]);
                let output = output.map(|n| map_all(&[n])[0]);
                ElementKind::Operation {
                    input,
                    output,
                    exceptions: map_all(exceptions),
                    thematic_grid_name: thematic_grid_name.clone(),
                }
            }
            ElementKind::Parameters { parameters } => ElementKind::Parameters {
                parameters: map_all(parameters),
            },
            ElementKind::Parameter { data, complex_type } => ElementKind::Parameter {
                data: data.clone(),
                complex_type: map_all(complex_type),
            },
        }
    }

    /// Whether a node of this variant may own `child` directly.
    ///
    /// Operations own parameter groups through their input, output and
    /// exception slots, never through a plain child list.
    pub fn can_own(&self, child: &ElementKind) -> bool {
        matches!(
            (self, child),
            (ElementKind::Artifact { .. }, ElementKind::Interface { .. })
                | (ElementKind::Interface { .. }, ElementKind::Interface { .. })
                | (ElementKind::Interface { .. }, ElementKind::Operation { .. })
                | (ElementKind::Operation { .. }, ElementKind::Parameters { .. })
                | (ElementKind::Parameters { .. }, ElementKind::Parameter { .. })
                | (ElementKind::Parameter { .. }, ElementKind::Parameter { .. })
        )
    }
}

/// One node of an interface signature.
#[derive(Debug, Clone)]
pub struct SignatureElement {
    id: ElementId,
    /// `None` marks a root or a detached copy.
    parent: Option<NodeIdx>,
    pub category: String,
    pub identifier: String,
    pub qualified_identifier: String,
    pub numerus: Numerus,
    pub has_public_accessible_attributes: bool,
    pub documentation_allowed: bool,
    pub documentation_changed: bool,
    documentations: Cow<'static, [Documentation]>,
    kind: ElementKind,
}

impl SignatureElement {
    pub(crate) fn new(
        id: ElementId,
        parent: Option<NodeIdx>,
        category: impl Into<String>,
        identifier: impl Into<String>,
        kind: ElementKind,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            id,
            parent,
            category: category.into(),
            qualified_identifier: identifier.clone(),
            identifier,
            numerus: Numerus::default(),
            has_public_accessible_attributes: false,
            documentation_allowed: true,
            documentation_changed: false,
            documentations: Cow::Borrowed(&[]),
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIdx>) {
        self.parent = parent;
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: ElementKind) {
        self.kind = kind;
    }

    pub fn documentations(&self) -> &[Documentation] {
        &self.documentations
    }

    /// True while the shared empty sequence has not been replaced.
    pub fn has_shared_documentations(&self) -> bool {
        matches!(self.documentations, Cow::Borrowed(_))
    }

    pub(crate) fn push_documentation(&mut self, doc: Documentation) {
        self.documentations.to_mut().push(doc);
    }

    pub(crate) fn replace_documentations(&mut self, docs: Vec<Documentation>) {
        self.documentations = if docs.is_empty() {
            Cow::Borrowed(&[])
        } else {
            Cow::Owned(docs)
        };
    }

    /// Deep copy of the documentation sequence.
    pub(crate) fn copied_documentations(&self) -> Cow<'static, [Documentation]> {
        match &self.documentations {
            Cow::Borrowed(_) => Cow::Borrowed(&[]),
            Cow::Owned(docs) => Cow::Owned(docs.iter().map(Documentation::copy).collect()),
        }
    }

    pub(crate) fn set_copied_documentations(&mut self, docs: Cow<'static, [Documentation]>) {
        self.documentations = docs;
    }

    pub fn is_operation(&self) -> bool {
        matches!(self.kind, ElementKind::Operation { .. })
    }

    pub fn is_parameter_like(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Parameters { .. } | ElementKind::Parameter { .. }
        )
    }

    pub fn parameter_data(&self) -> Option<&ParameterData> {
        match &self.kind {
            ElementKind::Parameter { data, .. } => Some(data),
            _ => None,
        }
    }

    pub(crate) fn parameter_data_mut(&mut self) -> Option<&mut ParameterData> {
        match &mut self.kind {
            ElementKind::Parameter { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn thematic_grid_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Operation {
                thematic_grid_name, ..
            } => thematic_grid_name.as_deref(),
            _ => None,
        }
    }

    /// Pin a thematic grid to an operation. Ignored for other variants.
    pub fn set_thematic_grid_name(&mut self, name: Option<String>) {
        if let ElementKind::Operation {
            thematic_grid_name, ..
        } = &mut self.kind
        {
            *thematic_grid_name = name;
        }
    }

    /// `identifier [category]`, or `identifier (Type: T) [category]` for
    /// parameters.
    pub fn display_name(&self) -> String {
        match self.parameter_data() {
            Some(data) => format!(
                "{} (Type: {}) [{}]",
                self.identifier, data.data_type_name, self.category
            ),
            None => format!("{} [{}]", self.identifier, self.category),
        }
    }

    pub fn qualified_display_name(&self) -> String {
        match self.parameter_data() {
            Some(data) => format!(
                "{} (Type: {}) [{}]",
                self.qualified_identifier, data.qualified_data_type_name, self.category
            ),
            None => format!("{} [{}]", self.qualified_identifier, self.category),
        }
    }
}
