// Author: Dustin Pilgrim
// License: MIT

use crate::VdfError;
use crate::ast::{Node, NodeKind};

/// Split a `/`-delimited path into its key segments.
///
/// There is no escaping, so a literal `/` inside a key cannot be addressed.
pub fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}

impl Node {
    /// Walk the children of `self` by exact key, first match wins.
    ///
    /// Returns `None` for an empty path or when any segment has no match.
    ///
    /// # Examples
    /// ```
    /// # use vdf_cfg::parse_str;
    /// let root = parse_str("\"a\"\n{\n\"b\"\t\"1\"\n}\n").unwrap();
    /// assert_eq!(root.find("a/b").and_then(|n| n.value()), Some("1"));
    /// assert!(root.find("a/c").is_none());
    /// ```
    pub fn find(&self, path: &str) -> Option<&Node> {
        let segments = split_path(path);
        if segments.is_empty() {
            return None;
        }

        let mut current = self;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
        let segments = split_path(path);
        if segments.is_empty() {
            return None;
        }

        let mut current = self;
        for segment in segments {
            current = match &mut current.kind {
                NodeKind::Object(children) => children.iter_mut().find(|c| c.key == segment)?,
                NodeKind::Leaf(_) => return None,
            };
        }
        Some(current)
    }

    /// Set the leaf at `path`, creating missing intermediate objects.
    ///
    /// Missing segments are appended at the end of their parent's children.
    /// An existing final key is overwritten in place, keeping its position.
    /// A leaf met on the way is promoted to an empty object, and an object
    /// found at the final segment is replaced by the new leaf.
    ///
    /// # Errors
    /// Only an empty path is rejected.
    pub fn upsert(&mut self, path: &str, value: &str) -> Result<(), VdfError> {
        let segments = split_path(path);
        let Some((last, parents)) = segments.split_last() else {
            return Err(VdfError::InvalidPath {
                path: path.to_string(),
                message: "cannot set a value at an empty path".into(),
                hint: Some("Name at least one key, e.g. \"apps/570/LaunchOptions\"".into()),
                code: Some(305),
            });
        };

        let mut current = self;
        for segment in parents {
            current = current.object_child_or_insert(segment);
        }

        let children = current.children_mut_or_promote();
        match children.iter_mut().find(|c| c.key == *last) {
            Some(existing) => existing.kind = NodeKind::Leaf(value.to_string()),
            None => children.push(Node::leaf(*last, value)),
        }
        Ok(())
    }

    fn object_child_or_insert(&mut self, key: &str) -> &mut Node {
        let children = self.children_mut_or_promote();
        let index = match children.iter().position(|c| c.key == key) {
            Some(index) => index,
            None => {
                children.push(Node::object(key, Vec::new()));
                children.len() - 1
            }
        };

        let child = &mut children[index];
        if !child.is_object() {
            child.kind = NodeKind::Object(Vec::new());
        }
        child
    }
}
