//! Structural Invariant Checker
//!
//! Re-derives every structural property a file tree must hold and reports
//! the first one that is broken. The checker reads nodes only through the
//! `NodeAccess` trait and never mutates anything; failures are reported as
//! a `Violation` and logged at `warn` level.

use crate::error::TreeError;
use crate::path::TreePath;
use crate::types::NodeKind;
use thiserror::Error;
use tracing::warn;

/// Read-only view of a node, as much as the checker needs
pub trait NodeAccess: Sized {
    fn path(&self) -> &TreePath;
    fn kind(&self) -> NodeKind;
    fn parent(&self) -> Option<Self>;
    fn num_children(&self) -> Result<usize, TreeError>;
    fn child(&self, index: usize) -> Result<Self, TreeError>;
}

/// A broken invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("A node is missing")]
    MissingNode,

    #[error("Parent and child do not have parent/child paths: ({parent}) ({child})")]
    ParentPathMismatch { parent: String, child: String },

    #[error("Not initialized, but count is {count}")]
    UninitializedWithNodes { count: usize },

    #[error("Root {0} has a parent")]
    RootHasParent(String),

    #[error("Root {0} does not have depth 1")]
    RootDepth(String),

    #[error("Root {0} is not a directory")]
    RootNotDirectory(String),

    #[error("File {0} has children")]
    FileHasChildren(String),

    #[error("Cannot count the children of {parent}: {reason}")]
    ChildCount { parent: String, reason: String },

    #[error("Child count of {parent} claims index {index}, but lookup failed: {reason}")]
    ChildAccess {
        parent: String,
        index: usize,
        reason: String,
    },

    #[error("Adjacent children {first} and {second} do not share a parent")]
    SiblingParentMismatch { first: String, second: String },

    #[error("Children are not in lexicographic order: {first} before {second}")]
    OutOfOrder { first: String, second: String },

    #[error("More than one child {path} under {parent}")]
    DuplicateChild { parent: String, path: String },

    #[error("Discrepancy in number of nodes in tree: reported {reported}, found {actual}")]
    CountMismatch { reported: usize, actual: usize },
}

/// Check a single node: it exists and its parent's path is its own path minus one level.
pub fn check_node<N: NodeAccess>(node: Option<&N>) -> Result<(), Violation> {
    let node = node.ok_or(Violation::MissingNode)?;

    if let Some(parent) = node.parent() {
        let path = node.path();
        if path.shared_prefix_depth(parent.path()) + 1 != path.depth()
            || parent.path().depth() + 1 != path.depth()
        {
            return Err(Violation::ParentPathMismatch {
                parent: parent.path().to_string(),
                child: path.to_string(),
            });
        }
    }

    Ok(())
}

/// Check a whole tree described by its state triple.
///
/// Walks the tree pre-order from `root` and stops at the first violation.
pub fn check_tree<N: NodeAccess>(
    is_initialized: bool,
    root: Option<&N>,
    count: usize,
) -> Result<(), Violation> {
    if !is_initialized && count != 0 {
        return Err(Violation::UninitializedWithNodes { count });
    }

    let actual = match root {
        Some(root) => {
            check_root(root)?;
            walk(root)?
        }
        None => 0,
    };

    if actual != count {
        return Err(Violation::CountMismatch {
            reported: count,
            actual,
        });
    }
    Ok(())
}

/// `check_node` as a predicate; logs the violation.
pub fn node_is_valid<N: NodeAccess>(node: Option<&N>) -> bool {
    report(check_node(node))
}

/// `check_tree` as a predicate; logs the violation.
pub fn tree_is_valid<N: NodeAccess>(is_initialized: bool, root: Option<&N>, count: usize) -> bool {
    report(check_tree(is_initialized, root, count))
}

fn report(result: Result<(), Violation>) -> bool {
    match result {
        Ok(()) => true,
        Err(violation) => {
            warn!("Tree invariant violated: {}", violation);
            false
        }
    }
}

fn check_root<N: NodeAccess>(root: &N) -> Result<(), Violation> {
    let path = root.path().to_string();
    if root.parent().is_some() {
        return Err(Violation::RootHasParent(path));
    }
    if root.path().depth() != 1 {
        return Err(Violation::RootDepth(path));
    }
    if root.kind() != NodeKind::Directory {
        return Err(Violation::RootNotDirectory(path));
    }
    Ok(())
}

/// Walk state of one directory: the next child index and the last child finished
struct Cursor<N> {
    num_children: usize,
    next: usize,
    previous: Option<N>,
}

/// Pre-order walk over an explicit stack; returns the number of nodes under `root`
fn walk<N: NodeAccess>(root: &N) -> Result<usize, Violation> {
    let mut visited = 1;
    let mut root_cursor = enter(root)?;
    let mut stack: Vec<(N, Cursor<N>)> = Vec::new();

    loop {
        let (parent, cursor) = match stack.last_mut() {
            Some((node, cursor)) => (&*node, cursor),
            None => (root, &mut root_cursor),
        };

        if cursor.next == cursor.num_children {
            let Some((finished, _)) = stack.pop() else {
                break;
            };
            match stack.last_mut() {
                Some((_, cursor)) => cursor.previous = Some(finished),
                None => root_cursor.previous = Some(finished),
            }
            continue;
        }

        let index = cursor.next;
        cursor.next += 1;
        let child = child_at(parent, index)?;
        check_siblings(parent, cursor, index, &child)?;

        let child_cursor = enter(&child)?;
        visited += 1;
        stack.push((child, child_cursor));
    }

    Ok(visited)
}

/// Check a node on first visit and count its children
fn enter<N: NodeAccess>(node: &N) -> Result<Cursor<N>, Violation> {
    check_node(Some(node))?;

    let num_children = match (node.kind(), node.num_children()) {
        (NodeKind::File, Ok(0)) | (NodeKind::File, Err(TreeError::NotADirectory(_))) => 0,
        (NodeKind::File, _) => return Err(Violation::FileHasChildren(node.path().to_string())),
        (NodeKind::Directory, Ok(n)) => n,
        (NodeKind::Directory, Err(e)) => {
            return Err(Violation::ChildCount {
                parent: node.path().to_string(),
                reason: e.to_string(),
            })
        }
    };

    Ok(Cursor {
        num_children,
        next: 0,
        previous: None,
    })
}

/// Check `child`, found at `index` under `parent`, against its siblings
fn check_siblings<N: NodeAccess>(
    parent: &N,
    cursor: &Cursor<N>,
    index: usize,
    child: &N,
) -> Result<(), Violation> {
    if let Some(prev) = &cursor.previous {
        let same_parent = match (prev.parent(), child.parent()) {
            (Some(a), Some(b)) => a.path() == b.path(),
            _ => false,
        };
        if !same_parent {
            return Err(Violation::SiblingParentMismatch {
                first: prev.path().to_string(),
                second: child.path().to_string(),
            });
        }
        if child.path() < prev.path() {
            return Err(Violation::OutOfOrder {
                first: prev.path().to_string(),
                second: child.path().to_string(),
            });
        }
    }

    for other_index in (0..cursor.num_children).filter(|&i| i != index) {
        let other = child_at(parent, other_index)?;
        if other.path() == child.path() {
            return Err(Violation::DuplicateChild {
                parent: parent.path().to_string(),
                path: child.path().to_string(),
            });
        }
    }
    Ok(())
}

fn child_at<N: NodeAccess>(node: &N, index: usize) -> Result<N, Violation> {
    node.child(index).map_err(|e| Violation::ChildAccess {
        parent: node.path().to_string(),
        index,
        reason: e.to_string(),
    })
}
