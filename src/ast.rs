use serde::Serialize;

/// A single entry of a parsed VDF document.
///
/// The root of a document is an object with an empty key; it is a synthetic
/// container and is never written out as an entry of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub key: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    #[serde(rename = "value")]
    Leaf(String),
    #[serde(rename = "children")]
    Object(Vec<Node>), // insertion order is file order
}

impl Node {
    pub fn root() -> Self {
        Node::object("", Vec::new())
    }

    pub fn leaf(key: impl Into<String>, value: impl Into<String>) -> Self {
        Node {
            key: key.into(),
            kind: NodeKind::Leaf(value.into()),
        }
    }

    pub fn object(key: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            key: key.into(),
            kind: NodeKind::Object(children),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object(_))
    }

    /// The leaf value, or `None` for objects.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(v) => Some(v),
            NodeKind::Object(_) => None,
        }
    }

    /// Children in file order. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Object(children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// First direct child with the given key.
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.children().iter().map(|c| c.key.as_str()).collect()
    }

    /// Mutable children, turning a leaf into an empty object first.
    pub(crate) fn children_mut_or_promote(&mut self) -> &mut Vec<Node> {
        if let NodeKind::Leaf(_) = self.kind {
            self.kind = NodeKind::Object(Vec::new());
        }
        match &mut self.kind {
            NodeKind::Object(children) => children,
            NodeKind::Leaf(_) => unreachable!(),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::root()
    }
}

// Flatten the subtree before it drops, so deeply nested input can't exhaust
// the stack on the way out.
impl Drop for Node {
    fn drop(&mut self) {
        let NodeKind::Object(children) = &mut self.kind else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let NodeKind::Object(grandchildren) = &mut node.kind {
                pending.append(grandchildren);
            }
        }
    }
}
