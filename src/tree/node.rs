//! Tree nodes and the arena that owns them
//!
//! Every node lives in a slot of a `NodeArena`. A directory owns its
//! children through its `Children` list; the `parent` link is a plain
//! `NodeId` and never keeps anything alive. Destroying a node frees its
//! whole subtree.

use super::children::Children;
use crate::error::TreeError;
use crate::path::TreePath;
use crate::types::{NodeId, NodeKind};
use std::cmp::Ordering;

/// A single directory or file node
#[derive(Debug, Clone)]
pub struct Node {
    path: TreePath,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Children,
    contents: Option<Vec<u8>>,
}

impl Node {
    fn new(path: TreePath, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            path,
            kind,
            parent,
            children: Children::new(),
            contents: None,
        }
    }

    pub fn path(&self) -> &TreePath {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// File contents; always `None` for directories
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Content length; 0 for directories and empty files
    pub fn size(&self) -> usize {
        self.contents.as_ref().map_or(0, Vec::len)
    }

    /// Order two nodes by path
    pub fn compare(&self, other: &Node) -> Ordering {
        self.path.cmp(&other.path)
    }
}

/// Slot storage for all nodes of one tree
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    live: usize,
    #[cfg(test)]
    slot_limit: Option<usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes across all subtrees
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Like `get`, but a stale id is a lookup miss
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.get(id)
            .ok_or_else(|| TreeError::NoSuchPath(format!("node {} is not live", id)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| TreeError::NoSuchPath(format!("node {} is not live", id)))
    }

    /// Create a node for `path` and link it under `parent`.
    ///
    /// With a parent, the parent must be a directory one level above `path`
    /// that has no child at `path` yet. Without one, `path` must have depth 1
    /// and the caller becomes the owner of the new root. On error nothing is
    /// linked and the parent's children are unchanged.
    pub fn create(
        &mut self,
        path: &TreePath,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        let insert_index = match parent {
            Some(parent_id) => Some(self.validate_child(path, parent_id)?),
            None => {
                if path.depth() != 1 {
                    return Err(TreeError::NoSuchPath(format!(
                        "{} cannot be created without a parent",
                        path
                    )));
                }
                None
            }
        };

        let id = self.allocate(Node::new(path.clone(), kind, parent))?;

        if let (Some(parent_id), Some(index)) = (parent, insert_index) {
            let linked = self
                .node_mut(parent_id)
                .and_then(|p| p.children.insert_at(index, path.as_str(), id));
            if let Err(e) = linked {
                self.release(id);
                return Err(e);
            }
        }

        Ok(id)
    }

    /// Check that `path` may become a child of `parent_id`; returns the insertion index
    fn validate_child(&self, path: &TreePath, parent_id: NodeId) -> Result<usize, TreeError> {
        let parent = self.node(parent_id)?;
        if parent.kind != NodeKind::Directory {
            return Err(TreeError::NotADirectory(format!(
                "{} cannot have children",
                parent.path
            )));
        }

        let parent_depth = parent.path.depth();
        if path.shared_prefix_depth(&parent.path) < parent_depth {
            return Err(TreeError::ConflictingPath(format!(
                "{} is not under {}",
                path, parent.path
            )));
        }
        if path.depth() != parent_depth + 1 {
            return Err(TreeError::NoSuchPath(format!(
                "{} is not one level below {}",
                path, parent.path
            )));
        }

        parent
            .children
            .find_path(path.as_str())
            .err()
            .ok_or_else(|| TreeError::AlreadyInTree(path.to_string()))
    }

    /// Unlink `id` from its parent and free its whole subtree.
    ///
    /// Returns the number of nodes freed; 0 for a stale id.
    pub fn destroy(&mut self, id: NodeId) -> usize {
        let Some(node) = self.take(id) else {
            return 0;
        };

        if let Some(parent_id) = node.parent {
            if let Some(parent) = self.slots.get_mut(parent_id.0).and_then(Option::as_mut) {
                if let Some(index) = parent.children.find_node(node.path.as_str(), id) {
                    parent.children.remove_at(index);
                }
            }
        }

        self.free_subtree(node)
    }

    fn free_subtree(&mut self, node: Node) -> usize {
        let mut freed = 0;
        let mut pending = vec![node];
        while let Some(mut node) = pending.pop() {
            freed += 1;
            while let Some(child_id) = node.children.pop() {
                if let Some(child) = self.take(child_id) {
                    pending.push(child);
                }
            }
        }
        freed
    }

    /// Search `parent`'s children for `pathname`.
    ///
    /// `Ok(index)` if present, `Err(index)` with the insertion point if not.
    /// A file never has children, so the result is `Err(0)`.
    pub fn find_child(&self, parent: NodeId, pathname: &str) -> Result<usize, usize> {
        match self.get(parent) {
            Some(node) if node.kind == NodeKind::Directory => node.children.find_path(pathname),
            _ => Err(0),
        }
    }

    pub fn has_child(&self, parent: NodeId, path: &TreePath) -> bool {
        self.find_child(parent, path.as_str()).is_ok()
    }

    /// Child of `parent` at `index`
    pub fn child(&self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        let node = self.node(parent)?;
        if node.kind != NodeKind::Directory {
            return Err(TreeError::NotADirectory(node.path.to_string()));
        }
        node.children.get(index).ok_or_else(|| {
            TreeError::NoSuchPath(format!("{} has no child at index {}", node.path, index))
        })
    }

    pub fn num_children(&self, parent: NodeId) -> Result<usize, TreeError> {
        let node = self.node(parent)?;
        if node.kind != NodeKind::Directory {
            return Err(TreeError::NotADirectory(node.path.to_string()));
        }
        Ok(node.children.len())
    }

    /// Store `contents` in a file node, returning the buffer it replaces
    pub fn insert_contents(
        &mut self,
        id: NodeId,
        contents: Vec<u8>,
    ) -> Result<Option<Vec<u8>>, TreeError> {
        let node = self.node_mut(id)?;
        if node.kind != NodeKind::File {
            return Err(TreeError::BadPath(format!(
                "{} is a directory and holds no contents",
                node.path
            )));
        }
        Ok(node.contents.replace(contents))
    }

    /// Make allocation fail once `limit` nodes are live
    #[cfg(test)]
    pub(crate) fn set_slot_limit(&mut self, limit: Option<usize>) {
        self.slot_limit = limit;
    }

    fn allocate(&mut self, node: Node) -> Result<NodeId, TreeError> {
        #[cfg(test)]
        if self.slot_limit.is_some_and(|limit| self.live >= limit) {
            return Err(TreeError::MemoryError(format!(
                "node slot limit of {} reached",
                self.live
            )));
        }

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.try_reserve(1).map_err(|e| {
                    TreeError::MemoryError(format!("Failed to allocate node slot: {}", e))
                })?;
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.live += 1;
        Ok(NodeId(index))
    }

    fn take(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.0).and_then(Option::take)?;
        self.free.push(id.0);
        self.live -= 1;
        Some(node)
    }

    fn release(&mut self, id: NodeId) {
        self.take(id);
    }
}
