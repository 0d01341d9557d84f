//! In-memory file tree
//!
//! Nodes are stored in a `NodeArena`; `FileTree` is the handle callers use.

pub mod children;
pub mod file_tree;
pub mod node;
pub mod node_ref;

pub use file_tree::FileTree;
pub use node::{Node, NodeArena};
pub use node_ref::NodeRef;
