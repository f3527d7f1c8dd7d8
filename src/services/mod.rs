//! Entry points used by editors and batch pipelines.
//!
//! - [`grid_service`]: candidate grids for an identifier
//! - [`rule_service`]: rule checks and the recommended/optional partition

pub mod grid_service;
pub mod rule_service;

pub use grid_service::{
    collect_thematic_roles, derive_thematic_grid, find_matching_grids, find_thematic_grid_by_name,
};
pub use rule_service::{derive_roles_recommendation, evaluate_rule, is_rule_valid};
