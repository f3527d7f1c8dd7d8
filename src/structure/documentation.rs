//! Documentation fragments attached to signature elements.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::thematic::ThematicRole;

/// An audience of documentation text, e.g. "Developer" or "Manager".
///
/// Identified by name.
#[derive(Debug, Clone)]
pub struct Addressee {
    pub name: String,
    pub description: String,
    pub is_default: bool,
}

impl Addressee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_default: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl PartialEq for Addressee {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Addressee {}

impl Hash for Addressee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Addressee {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Addressee {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Whether a documentation was written for the element itself or inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Explicit,
    Implicit,
}

/// One documentation fragment: per-addressee texts tagged with a thematic role.
///
/// `signature_element_identifier` is the path of the element the fragment
/// belongs to; reconciliation matches on it after a re-parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Documentation {
    pub thematic_role: Option<Arc<ThematicRole>>,
    pub scope: Scope,
    pub signature_element_identifier: Option<String>,
    documentation: FxHashMap<Addressee, String>,
    /// Read order of the addressees. The map has no order of its own.
    addressee_sequence: Vec<Addressee>,
}

impl Documentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment targeting the element at `path`.
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            signature_element_identifier: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Arc<ThematicRole>) -> Self {
        self.thematic_role = Some(role);
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_text(mut self, addressee: Addressee, text: impl Into<String>) -> Self {
        self.set_text(addressee, text);
        self
    }

    /// Set the text for an addressee. New addressees are appended to the
    /// read order; existing ones keep their position.
    pub fn set_text(&mut self, addressee: Addressee, text: impl Into<String>) {
        if !self.documentation.contains_key(&addressee) {
            self.addressee_sequence.push(addressee.clone());
        }
        self.documentation.insert(addressee, text.into());
    }

    /// Remove the text of an addressee from both the map and the read order.
    pub fn remove_text(&mut self, addressee: &Addressee) -> Option<String> {
        let removed = self.documentation.remove(addressee);
        if removed.is_some() {
            self.addressee_sequence.retain(|a| a != addressee);
        }
        removed
    }

    pub fn text(&self, addressee: &Addressee) -> Option<&str> {
        self.documentation.get(addressee).map(String::as_str)
    }

    pub fn addressee_sequence(&self) -> &[Addressee] {
        &self.addressee_sequence
    }

    /// Texts in addressee read order.
    pub fn texts_in_order(&self) -> impl Iterator<Item = (&Addressee, &str)> + '_ {
        self.addressee_sequence.iter().filter_map(|addressee| {
            self.documentation
                .get(addressee)
                .map(|text| (addressee, text.as_str()))
        })
    }

    pub fn role_name(&self) -> Option<&str> {
        self.thematic_role.as_deref().map(|role| role.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.documentation.values().all(|text| text.trim().is_empty())
    }

    /// A fully independent deep clone.
    ///
    /// The map and the addressee sequence are rebuilt, so editing the copy
    /// never touches the original. The role is shared; roles are immutable.
    pub fn copy(&self) -> Self {
        let mut documentation =
            FxHashMap::with_capacity_and_hasher(self.documentation.len(), Default::default());
        for (addressee, text) in &self.documentation {
            documentation.insert(addressee.clone(), text.clone());
        }

        Self {
            thematic_role: self.thematic_role.clone(),
            scope: self.scope,
            signature_element_identifier: self.signature_element_identifier.clone(),
            documentation,
            addressee_sequence: self.addressee_sequence.to_vec(),
        }
    }
}

/// Find the first documentation tagged with the role `role_name`.
pub fn find_documentation_by_role_name<'a>(
    role_name: &str,
    documentations: impl IntoIterator<Item = &'a Documentation>,
) -> Option<&'a Documentation> {
    documentations
        .into_iter()
        .find(|doc| doc.role_name() == Some(role_name))
}
