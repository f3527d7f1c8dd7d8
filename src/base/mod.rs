//! Foundation types for the sigdoc core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`ElementId`], [`IdCounter`] - logical element identity, per parse session
//! - [`NodeIdx`] - arena slots inside a signature tree
//! - [`Delimiters`] - per-format path/type/namespace separators
//!
//! This module has NO dependencies on other sigdoc modules.

mod delimiters;
mod id;

pub use delimiters::Delimiters;
pub use id::{ElementId, IdCounter, NodeIdx};
