//! Signature tree tests
//!
//! - Path-based documentation reconciliation after a re-parse
//! - Deep copies across trees
//! - Parameter paths for export

pub mod tests_copy;
pub mod tests_paths;
pub mod tests_reconcile;
