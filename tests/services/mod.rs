//! Service layer tests
//!
//! - Thematic grid lookup by verb
//! - Rule evaluation and the recommended/optional partition

pub mod tests_grid_service;
pub mod tests_rule_service;
