//! Generic interface model.
//!
//! An interface signature is a tree of [`SignatureElement`]s stored in a
//! [`SignatureTree`] arena:
//!
//! ```text
//! Artifact
//!   └─ Interface (inner interfaces nest)
//!        └─ Operation
//!             ├─ input:      Parameters ─ Parameter ─ Parameter ...
//!             ├─ output:     Parameters ─ Parameter ...
//!             └─ exceptions: Parameters ...
//! ```
//!
//! ## Key Types
//!
//! - [`SignatureTree`]: arena owning every element, construction and copy
//! - [`Documentation`]: per-addressee texts tagged with a thematic role
//! - [`ThematicRole`] / [`ThematicGrid`]: the role catalog
//! - [`MatchOutcome`]: result of path-based reconciliation

mod documentation;
mod element;
mod navigation;
mod reconcile;
mod thematic;
mod tree;

pub use documentation::{Addressee, Documentation, Scope, find_documentation_by_role_name};
pub use element::{ElementKind, Numerus, ParameterData, ParameterType, SignatureElement};
pub use reconcile::{MatchOutcome, ParameterPathElement, parse_path_element, split_path};
pub use thematic::{
    RoleMap, RoleScope, RolesRecommendations, ThematicGrid, ThematicRole, ThematicRoleContext,
    contains_role, find_role_by_name,
};
pub use tree::SignatureTree;
