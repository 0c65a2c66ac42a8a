//! Binary tree data model.
//!
//! A [`BinaryTree`] owns an optional root [`Node`], and every node owns its
//! children outright. Trees are built whole, either by the bracket parser or
//! programmatically through [`Node::with_children`], and are only ever replaced
//! or cleared afterwards.

use serde::Serialize;

type Link<T> = Option<Box<Node<T>>>;

/// A single node: a value plus optional left and right subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node<T> {
    value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    left: Link<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a leaf.
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Creates a node owning the given subtrees.
    pub fn with_children(value: T, left: Option<Node<T>>, right: Option<Node<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn children(&self) -> impl Iterator<Item = &Node<T>> {
        self.left().into_iter().chain(self.right())
    }
}

// Children are detached onto a work list so that dropping a long chain of
// nodes never recurses.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// A rooted, possibly empty binary tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryTree<T> {
    root: Link<T>,
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn from_root(root: Node<T>) -> Self {
        Self {
            root: Some(Box::new(root)),
        }
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Discards every node; the tree becomes empty.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Replaces the whole tree, dropping the previous one.
    pub fn replace(&mut self, other: BinaryTree<T>) {
        *self = other;
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    /// Number of edges on the longest root-to-leaf path, `None` when empty.
    pub fn height(&self) -> Option<usize> {
        let mut deepest = None;
        let mut stack: Vec<(&Node<T>, usize)> = self.root().map(|n| (n, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(Some(depth));
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Values in pre-order (node, left subtree, right subtree).
    pub fn values(&self) -> Vec<&T> {
        let mut values = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            values.push(node.value());
            stack.extend(node.right());
            stack.extend(node.left());
        }
        values
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Node<T>> for BinaryTree<T> {
    fn from(root: Node<T>) -> Self {
        Self::from_root(root)
    }
}
