//! File tree handle
//!
//! `FileTree` owns the state triple (initialized flag, root, node count)
//! together with the node arena, and exposes the insert/remove/lookup API.
//! Every mutation either completes or leaves the tree exactly as it was.

use super::node::NodeArena;
use super::node_ref::NodeRef;
use crate::checker::{self, Violation};
use crate::config::FileTreeConfig;
use crate::error::TreeError;
use crate::path::{TreePath, SEPARATOR};
use crate::types::{NodeId, NodeKind, NodeStat};
use tracing::debug;

/// In-memory directory/file hierarchy
#[derive(Debug)]
pub struct FileTree {
    initialized: bool,
    root: Option<NodeId>,
    count: usize,
    arena: NodeArena,
    verify_invariants: bool,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    /// Create an uninitialized tree; call `init` before use
    pub fn new() -> Self {
        Self::with_config(&FileTreeConfig::default())
    }

    pub fn with_config(config: &FileTreeConfig) -> Self {
        Self {
            initialized: false,
            root: None,
            count: 0,
            arena: NodeArena::new(),
            verify_invariants: config.verify_invariants,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of live nodes in the tree
    pub fn node_count(&self) -> usize {
        self.count
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.and_then(|id| NodeRef::new(&self.arena, id).ok())
    }

    /// Transition to the initialized state with an empty hierarchy
    pub fn init(&mut self) -> Result<(), TreeError> {
        if self.initialized {
            return Err(TreeError::InitializationError(
                "tree is already initialized".to_string(),
            ));
        }
        self.initialized = true;
        self.root = None;
        self.count = 0;
        self.verify();
        Ok(())
    }

    /// Free every node and return to the uninitialized state
    pub fn destroy(&mut self) -> Result<(), TreeError> {
        self.require_initialized()?;
        if let Some(root) = self.root.take() {
            let freed = self.arena.destroy(root);
            debug!(freed, "Destroyed tree");
        }
        self.count = 0;
        self.initialized = false;
        self.verify();
        Ok(())
    }

    /// Insert a directory, creating any missing ancestors
    pub fn insert_dir(&mut self, pathname: &str) -> Result<(), TreeError> {
        self.require_initialized()?;
        let path = TreePath::parse(pathname)?;
        let result = self.insert_chain(&path, None);
        self.verify();
        let created = result?;
        debug!(path = %path, created, "Inserted directory");
        Ok(())
    }

    /// Insert a file holding `contents`, creating any missing parent directories.
    ///
    /// A file can never occupy the root position, so the tree must already
    /// have a root that is an ancestor of `pathname`.
    pub fn insert_file(&mut self, pathname: &str, contents: Vec<u8>) -> Result<(), TreeError> {
        self.require_initialized()?;
        if pathname.strip_prefix(SEPARATOR) == Some("") {
            return Err(TreeError::ConflictingPath(
                "a file cannot be the root".to_string(),
            ));
        }
        let path = TreePath::parse(pathname)?;
        if path.depth() == 1 {
            return Err(TreeError::ConflictingPath(format!(
                "a file cannot be the root: {}",
                path
            )));
        }
        let size = contents.len();
        let result = self.insert_chain(&path, Some(contents));
        self.verify();
        let created = result?;
        debug!(path = %path, created, size, "Inserted file");
        Ok(())
    }

    /// Build the missing levels from the deepest existing ancestor down to `path`.
    ///
    /// With `file_contents` the deepest level is a file. Returns the number of
    /// nodes created; on error every node created so far is freed again.
    fn insert_chain(
        &mut self,
        path: &TreePath,
        file_contents: Option<Vec<u8>>,
    ) -> Result<usize, TreeError> {
        let ancestor = self.traverse_path(path)?;

        let start_depth = match ancestor {
            None if self.root.is_some() => {
                return Err(TreeError::ConflictingPath(format!(
                    "{} is not under the existing root",
                    path
                )))
            }
            None if file_contents.is_some() => {
                return Err(TreeError::ConflictingPath(format!(
                    "a file cannot be the root: {}",
                    path
                )))
            }
            None => 1,
            Some(id) => {
                let node = self.arena.node(id)?;
                if node.path() == path {
                    return Err(TreeError::AlreadyInTree(path.to_string()));
                }
                node.path().depth() + 1
            }
        };

        let mut first_new: Option<NodeId> = None;
        let built = self.build_levels(path, ancestor, start_depth, file_contents, &mut first_new);
        match built {
            Ok(()) => {
                let created = path.depth() + 1 - start_depth;
                if self.root.is_none() {
                    self.root = first_new;
                }
                self.count += created;
                Ok(created)
            }
            Err(e) => {
                if let Some(id) = first_new {
                    self.arena.destroy(id);
                }
                Err(e)
            }
        }
    }

    fn build_levels(
        &mut self,
        path: &TreePath,
        ancestor: Option<NodeId>,
        start_depth: usize,
        file_contents: Option<Vec<u8>>,
        first_new: &mut Option<NodeId>,
    ) -> Result<(), TreeError> {
        let target_depth = path.depth();
        let mut parent = ancestor;
        let mut file_contents = file_contents;

        for depth in start_depth..=target_depth {
            let kind = if depth == target_depth && file_contents.is_some() {
                NodeKind::File
            } else {
                NodeKind::Directory
            };
            let prefix = path.prefix(depth)?;
            let id = self.arena.create(&prefix, kind, parent)?;
            if first_new.is_none() {
                *first_new = Some(id);
            }

            if kind == NodeKind::File {
                if let Some(contents) = file_contents.take() {
                    self.arena.insert_contents(id, contents)?;
                }
            }
            parent = Some(id);
        }
        Ok(())
    }

    /// Walk from the root towards `path`, returning the deepest node reached.
    ///
    /// `None` means the tree is empty. Reaching a file before `path` is
    /// consumed is an error, since files have no descendants.
    fn traverse_path(&self, path: &TreePath) -> Result<Option<NodeId>, TreeError> {
        let Some(root) = self.root else {
            return Ok(None);
        };

        let root_node = self.arena.node(root)?;
        if root_node.path().as_str() != path.prefix_str(1)? {
            return Err(TreeError::ConflictingPath(format!(
                "{} is not under root {}",
                path,
                root_node.path()
            )));
        }

        let mut current = root;
        for depth in 2..=path.depth() {
            let node = self.arena.node(current)?;
            if node.kind() == NodeKind::File {
                return Err(TreeError::BadPath(format!(
                    "{} lies under file {}",
                    path,
                    node.path()
                )));
            }
            match self.arena.find_child(current, path.prefix_str(depth)?) {
                Ok(index) => current = self.arena.child(current, index)?,
                Err(_) => break,
            }
        }
        Ok(Some(current))
    }

    /// Resolve `pathname` to the node stored there
    pub fn find_node(&self, pathname: &str) -> Result<NodeRef<'_>, TreeError> {
        self.require_initialized()?;
        let path = TreePath::parse(pathname)?;
        let found = self
            .traverse_path(&path)?
            .ok_or_else(|| TreeError::NoSuchPath(path.to_string()))?;
        let node = NodeRef::new(&self.arena, found)?;
        if *node.path() != path {
            return Err(TreeError::NoSuchPath(path.to_string()));
        }
        Ok(node)
    }

    pub fn contains_dir(&self, pathname: &str) -> bool {
        self.contains(pathname, NodeKind::Directory)
    }

    pub fn contains_file(&self, pathname: &str) -> bool {
        self.contains(pathname, NodeKind::File)
    }

    fn contains(&self, pathname: &str, kind: NodeKind) -> bool {
        self.find_node(pathname)
            .map(|node| node.kind() == kind)
            .unwrap_or(false)
    }

    /// Remove a directory and everything below it
    pub fn rm_dir(&mut self, pathname: &str) -> Result<(), TreeError> {
        self.remove(pathname, NodeKind::Directory)
    }

    pub fn rm_file(&mut self, pathname: &str) -> Result<(), TreeError> {
        self.remove(pathname, NodeKind::File)
    }

    fn remove(&mut self, pathname: &str, kind: NodeKind) -> Result<(), TreeError> {
        let node = self.find_node(pathname)?;
        let id = node.id();
        if node.kind() != kind {
            return Err(match kind {
                NodeKind::Directory => TreeError::NotADirectory(pathname.to_string()),
                NodeKind::File => TreeError::NotAFile(pathname.to_string()),
            });
        }

        let freed = self.arena.destroy(id);
        self.count = self.count.saturating_sub(freed);
        if self.count == 0 {
            self.root = None;
        }
        self.verify();
        debug!(path = pathname, freed, "Removed subtree");
        Ok(())
    }

    /// Contents of the file at `pathname`; `None` on any lookup failure or for a directory
    pub fn get_file_contents(&self, pathname: &str) -> Option<&[u8]> {
        let node = self.find_node(pathname).ok()?;
        if node.is_file() {
            node.contents()
        } else {
            None
        }
    }

    /// Swap in new contents for the file at `pathname`, returning the previous buffer
    pub fn replace_file_contents(&mut self, pathname: &str, contents: Vec<u8>) -> Option<Vec<u8>> {
        let node = self.find_node(pathname).ok()?;
        if !node.is_file() {
            return None;
        }
        let id = node.id();
        let previous = self.arena.insert_contents(id, contents).ok()?;
        self.verify();
        previous
    }

    /// Kind and, for files, size of the node at `pathname`
    pub fn stat(&self, pathname: &str) -> Result<NodeStat, TreeError> {
        let node = self.find_node(pathname)?;
        Ok(match node.kind() {
            NodeKind::Directory => NodeStat::Directory,
            NodeKind::File => NodeStat::File { size: node.size() },
        })
    }

    /// One line per node, pre-order, files before directories among siblings.
    ///
    /// `None` if the tree is not initialized.
    pub fn to_listing(&self) -> Option<String> {
        if !self.initialized {
            return None;
        }
        let mut out = String::new();
        if let Some(root) = self.root() {
            render(root, &mut out);
        }
        Some(out)
    }

    /// Run the invariant checker over the current state
    pub fn check(&self) -> bool {
        checker::tree_is_valid(self.initialized, self.root().as_ref(), self.count)
    }

    /// Like `check`, returning the first broken invariant
    pub fn check_invariants(&self) -> Result<(), Violation> {
        checker::check_tree(self.initialized, self.root().as_ref(), self.count)
    }

    fn verify(&self) {
        if self.verify_invariants {
            debug_assert!(self.check(), "file tree invariants violated");
        }
    }

    fn require_initialized(&self) -> Result<(), TreeError> {
        if self.initialized {
            Ok(())
        } else {
            Err(TreeError::InitializationError(
                "tree is not initialized".to_string(),
            ))
        }
    }
}

/// Pre-order over an explicit stack; siblings are pushed in reverse so
/// files pop before directories, each group in path order.
fn render(root: NodeRef<'_>, out: &mut String) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        out.push_str(node.path().as_str());
        out.push('\n');

        let (files, dirs): (Vec<_>, Vec<_>) = node.children().partition(|child| child.is_file());
        pending.extend(dirs.into_iter().rev());
        pending.extend(files.into_iter().rev());
    }
}
