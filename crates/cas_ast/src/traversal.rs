//! Canonical tree traversal utilities.
//!
//! All walks are iterative with an explicit stack, so deeply nested student
//! input cannot overflow the call stack.

use crate::expression::{Node, NodeId, Tree};

/// Nodes reachable from `start`, parents before children, children in
/// source order.
pub fn preorder(tree: &Tree, start: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(tree.get(id).children().into_iter().rev());
    }
    order
}

/// Count nodes reachable from `start` matching a predicate.
pub fn count_nodes_matching<F>(tree: &Tree, start: NodeId, mut pred: F) -> usize
where
    F: FnMut(&Node) -> bool,
{
    let mut count = 0;
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        if pred(node) {
            count += 1;
        }
        stack.extend(node.children());
    }
    count
}

/// True if any node reachable from `start` matches. Stops at the first hit.
pub fn any_node<F>(tree: &Tree, start: NodeId, mut pred: F) -> bool
where
    F: FnMut(&Node) -> bool,
{
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        if pred(node) {
            return true;
        }
        stack.extend(node.children());
    }
    false
}

/// Number of nodes reachable from `start`, `start` included.
pub fn reachable_count(tree: &Tree, start: NodeId) -> usize {
    count_nodes_matching(tree, start, |_| true)
}

/// Reachable node count plus the total length of identifier names and raw
/// literal text. Bounds how much rewriting a tree can absorb.
pub fn text_weight(tree: &Tree, start: NodeId) -> (usize, usize) {
    let mut nodes = 0;
    let mut text = 0;
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        nodes += 1;
        text += match node {
            Node::Identifier(name) => name.len(),
            Node::Float { raw: Some(raw), .. } => raw.len(),
            _ => 0,
        };
        stack.extend(node.children());
    }
    (nodes, text)
}
