//! Core types shared by the node arena, the tree handle and the checker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: index of a live node slot in a `NodeArena`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw slot index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node type, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }

    pub fn is_directory(self) -> bool {
        matches!(self, NodeKind::Directory)
    }
}

/// Result of `FileTree::stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeStat {
    Directory,
    File { size: usize },
}

impl NodeStat {
    pub fn is_file(&self) -> bool {
        matches!(self, NodeStat::File { .. })
    }

    /// Content length for files, `None` for directories
    pub fn size(&self) -> Option<usize> {
        match self {
            NodeStat::File { size } => Some(*size),
            NodeStat::Directory => None,
        }
    }
}
