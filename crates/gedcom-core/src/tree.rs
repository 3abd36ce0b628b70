//! Tree (XML-like) representation of records
//!
//! Structured exporters consume this shape: every node has a name and either
//! a text payload or a sequence of child nodes. It carries the same content
//! as the line format but none of its splitting.

use serde::{Deserialize, Serialize};

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeContent {
    Text(String),
    Children(Vec<TreeNode>),
}

/// A named node holding text or children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub content: TreeContent,
}

impl TreeNode {
    /// Create a text node
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: TreeContent::Text(value.into()),
        }
    }

    /// Create an element node with no children yet
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: TreeContent::Children(Vec::new()),
        }
    }

    /// Append a child, turning a text node into an element if needed
    ///
    /// A text payload becomes a leading `value` child so that nothing is
    /// lost.
    pub fn push(&mut self, child: TreeNode) {
        match &mut self.content {
            TreeContent::Children(children) => children.push(child),
            TreeContent::Text(text) => {
                let value = TreeNode::text("value", std::mem::take(text));
                self.content = TreeContent::Children(vec![value, child]);
            }
        }
    }

    /// Append a child built from a value, skipping empty values
    pub fn push_text(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.push(TreeNode::text(name, value));
        }
    }

    /// Builder form of [`TreeNode::push`]
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.push(child);
        self
    }

    /// Children of an element; empty for text nodes
    pub fn children(&self) -> &[TreeNode] {
        match &self.content {
            TreeContent::Children(children) => children,
            TreeContent::Text(_) => &[],
        }
    }

    /// Text payload of a text node
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            TreeContent::Text(text) => Some(text),
            TreeContent::Children(_) => None,
        }
    }

    /// First child with the given name
    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Text of the first child with the given name
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(TreeNode::as_text)
    }
}
