//! # sigdoc-core
//!
//! Core library for documenting interface signatures (WSDL port types, Java
//! classes) with per-audience documentation and thematic roles.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! services  → Role recommendation, thematic grid lookup
//!   ↓
//! rules     → Rule language: logos lexer, recursive-descent parser, evaluator
//!   ↓
//! structure → Signature tree arena, documentation, roles and grids, reconciliation
//!   ↓
//! core      → Text utilities (camel-case splitting, verb extraction)
//!   ↓
//! base      → Primitives (ElementId, NodeIdx, Delimiters)
//! ```
//!
//! `config` sits beside `services` and turns plain catalog data into the
//! roles and grids the services work on.

// ============================================================================
// MODULES (dependency order: base → core → structure → rules → services)
// ============================================================================

/// Foundation types: ElementId, IdCounter, NodeIdx, Delimiters
pub mod base;

/// Text utilities shared by grid lookup and rule evaluation
pub mod core;

/// Signature trees, documentation, thematic roles and grids
pub mod structure;

/// Rule language for role-based and grid-based rules
pub mod rules;

/// RuleService and ThematicGridService entry points
pub mod services;

/// Role catalog configuration
pub mod config;

mod error;

pub use error::{Error, Result};

// Re-export foundation types
pub use base::{Delimiters, ElementId, IdCounter, NodeIdx};
pub use structure::{
    Addressee, Documentation, MatchOutcome, RolesRecommendations, SignatureTree, ThematicGrid,
    ThematicRole,
};
