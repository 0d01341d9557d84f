//! Borrowed read-only node handles

use super::node::{Node, NodeArena};
use crate::checker::NodeAccess;
use crate::error::TreeError;
use crate::path::TreePath;
use crate::types::{NodeId, NodeKind};
use std::cmp::Ordering;

/// A live node together with the arena it belongs to
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a NodeArena,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(arena: &'a NodeArena, id: NodeId) -> Result<Self, TreeError> {
        let node = arena.node(id)?;
        Ok(Self { arena, id, node })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn path(&self) -> &'a TreePath {
        self.node.path()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn is_file(&self) -> bool {
        self.node.kind().is_file()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node
            .parent()
            .and_then(|id| NodeRef::new(self.arena, id).ok())
    }

    pub fn num_children(&self) -> Result<usize, TreeError> {
        self.arena.num_children(self.id)
    }

    pub fn child(&self, index: usize) -> Result<NodeRef<'a>, TreeError> {
        let id = self.arena.child(self.id, index)?;
        NodeRef::new(self.arena, id)
    }

    /// Children in storage order (ascending by path); empty for files
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let arena = self.arena;
        self.node
            .children()
            .iter()
            .filter_map(move |id| NodeRef::new(arena, id).ok())
    }

    pub fn contents(&self) -> Option<&'a [u8]> {
        self.node.contents()
    }

    pub fn size(&self) -> usize {
        self.node.size()
    }

    pub fn compare(&self, other: &NodeRef<'_>) -> Ordering {
        self.node.compare(other.node)
    }
}

impl<'a> NodeAccess for NodeRef<'a> {
    fn path(&self) -> &TreePath {
        self.node.path()
    }

    fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    fn parent(&self) -> Option<Self> {
        NodeRef::parent(self)
    }

    fn num_children(&self) -> Result<usize, TreeError> {
        NodeRef::num_children(self)
    }

    fn child(&self, index: usize) -> Result<Self, TreeError> {
        NodeRef::child(self, index)
    }
}
