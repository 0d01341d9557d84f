//! Absolute tree paths
//!
//! A `TreePath` is a validated, immutable absolute path such as `/a/b/c`.
//! Ordering is byte-wise on the pathname string, so siblings sort by name.

use crate::error::TreeError;
use std::cmp::Ordering;
use std::fmt;

/// Component separator
pub const SEPARATOR: char = '/';

/// Validated absolute path
#[derive(Debug, Clone)]
pub struct TreePath {
    pathname: String,
    /// Byte offset one past the end of each component
    ends: Vec<usize>,
}

impl TreePath {
    /// Parse and validate a pathname.
    ///
    /// The string must start with `/`, must not end with `/`, and every
    /// component must be non-empty.
    pub fn parse(pathname: &str) -> Result<Self, TreeError> {
        let rest = pathname.strip_prefix(SEPARATOR).ok_or_else(|| {
            TreeError::BadPath(format!("path must be absolute: {:?}", pathname))
        })?;
        if rest.is_empty() {
            return Err(TreeError::BadPath(format!(
                "path has no components: {:?}",
                pathname
            )));
        }

        let mut ends = Vec::new();
        let mut offset = 1;
        for component in rest.split(SEPARATOR) {
            if component.is_empty() {
                return Err(TreeError::BadPath(format!(
                    "empty component in {:?}",
                    pathname
                )));
            }
            offset += component.len();
            ends.push(offset);
            offset += SEPARATOR.len_utf8();
        }

        Ok(Self {
            pathname: pathname.to_string(),
            ends,
        })
    }

    /// Number of components
    pub fn depth(&self) -> usize {
        self.ends.len()
    }

    pub fn as_str(&self) -> &str {
        &self.pathname
    }

    /// Path formed by the first `depth` components, for `1 <= depth <= self.depth()`
    pub fn prefix(&self, depth: usize) -> Result<TreePath, TreeError> {
        Ok(Self {
            pathname: self.prefix_str(depth)?.to_string(),
            ends: self.ends[..depth].to_vec(),
        })
    }

    /// Borrowed pathname of `prefix(depth)`
    pub fn prefix_str(&self, depth: usize) -> Result<&str, TreeError> {
        if depth == 0 || depth > self.depth() {
            return Err(TreeError::NoSuchPath(format!(
                "no prefix of depth {} in {}",
                depth, self.pathname
            )));
        }
        Ok(&self.pathname[..self.ends[depth - 1]])
    }

    /// Iterate over components, shallowest first
    pub fn components(&self) -> impl Iterator<Item = &str> + '_ {
        let mut start = 1;
        self.ends.iter().map(move |&end| {
            let component = &self.pathname[start..end];
            start = end + SEPARATOR.len_utf8();
            component
        })
    }

    /// Final component
    pub fn name(&self) -> &str {
        let start = match self.ends.len() {
            0 | 1 => 1,
            n => self.ends[n - 2] + SEPARATOR.len_utf8(),
        };
        &self.pathname[start..]
    }

    /// Length of the longest common leading run of components
    pub fn shared_prefix_depth(&self, other: &TreePath) -> usize {
        self.components()
            .zip(other.components())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// True if `self` is `other` or one of its ancestors
    pub fn is_prefix_of(&self, other: &TreePath) -> bool {
        self.shared_prefix_depth(other) == self.depth()
    }
}

impl PartialEq for TreePath {
    fn eq(&self, other: &Self) -> bool {
        self.pathname == other.pathname
    }
}

impl Eq for TreePath {}

impl PartialOrd for TreePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreePath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pathname.as_bytes().cmp(other.pathname.as_bytes())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pathname)
    }
}
