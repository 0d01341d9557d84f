//! Filetree: In-Memory Hierarchical Namespace
//!
//! A directory/file tree addressed by absolute slash-delimited paths, with a
//! recursive checker that re-validates every structural invariant of the
//! tree after each mutation.

pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod tree;
pub mod types;

pub use crate::config::{ConfigLoader, FileTreeConfig};
pub use crate::error::{ApiError, TreeError};
pub use crate::path::TreePath;
pub use crate::tree::{FileTree, NodeRef};
pub use crate::types::{NodeId, NodeKind, NodeStat};
