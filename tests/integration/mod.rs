//! Integration tests for the in-memory file tree

mod config_loading;
mod tree_invariants;
mod tree_structure;
