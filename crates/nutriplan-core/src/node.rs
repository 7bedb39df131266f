//! Nodes of the rendered page tree.

use crate::{PropValue, Properties};

/// A node in the page tree.
///
/// Kinds are open strings; the layout crate defines the vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub props: Properties,
    pub children: Vec<Node>,
}

/// Node kind, e.g. `"page"`, `"div"`, `"text"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKind(pub String);

impl Node {
    /// Create a node of the given kind.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            props: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(key, value);
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Add several child nodes.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check the kind.
    pub fn is(&self, kind: &str) -> bool {
        self.kind.as_str() == kind
    }

    /// Depth-first search for the first node of a kind, including `self`.
    pub fn find(&self, kind: &str) -> Option<&Node> {
        if self.is(kind) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(kind))
    }

    /// Collect every node of a kind, depth-first, including `self`.
    pub fn find_all<'a>(&'a self, kind: &str) -> Vec<&'a Node> {
        let mut found = Vec::new();
        self.collect(kind, &mut found);
        found
    }

    fn collect<'a>(&'a self, kind: &str, found: &mut Vec<&'a Node>) {
        if self.is(kind) {
            found.push(self);
        }
        for child in &self.children {
            child.collect(kind, found);
        }
    }
}

impl NodeKind {
    /// Create a kind from a string.
    pub fn new(s: impl Into<String>) -> Self {
        NodeKind(s.into())
    }

    /// Get the kind as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        NodeKind(s.to_string())
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        NodeKind(s)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_depth_first() {
        let tree = Node::new("page")
            .child(Node::new("card").child(Node::new("text").prop("content", "a")))
            .child(Node::new("text").prop("content", "b"));
        let texts: Vec<_> = tree
            .find_all("text")
            .iter()
            .filter_map(|n| n.props.get_str("content"))
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(tree.find("card").is_some());
        assert!(tree.find("image").is_none());
    }
}
