pub mod catalog_fixtures;
pub mod tree_fixtures;
