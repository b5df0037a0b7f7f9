//! Arena-backed syntax tree with parent links.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. Every
//! attached node records its parent, so a subtree can be swapped for another
//! with [`Tree::replace`] by re-pointing a single slot. Nodes are never freed:
//! a replaced subtree stays in the arena, detached and unreachable from the
//! root.
//!
//! Constructors adopt the children they are given, even ones already held
//! elsewhere. A rewrite builds its replacement from pieces of the node it
//! replaces, so the old holder is only consistent again once
//! [`Tree::replace`] has swapped it out. [`Tree::validate`] reports any
//! holder left behind.

use crate::ensure_ast_invariant;
use crate::error::AstError;
use crate::span::Span;
use smallvec::SmallVec;
use std::fmt;

/// Stable index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Binary operators the upstream grammar produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
        }
    }

    /// Map an exponent sign character onto its operator.
    pub fn from_sign(sign: char) -> Option<Self> {
        match sign {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 3,
        }
    }
}

/// Where an operator came from.
///
/// Multiplications inserted while normalising student input carry
/// `Missing` or `Whitespace` so diagnostics can point at them later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpPosition {
    /// The student typed this operator here
    Source(Span),
    /// Synthesized: nothing separated the two operands
    #[default]
    Missing,
    /// Synthesized: only whitespace separated the two operands
    Whitespace,
}

impl OpPosition {
    pub fn is_synthesized(&self) -> bool {
        !matches!(self, OpPosition::Source(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root(NodeId),
    Identifier(String),
    Integer(i64),
    /// `raw` keeps the literal text when the parser could not fully interpret
    /// it (exponent notation); `None` otherwise.
    Float {
        value: f64,
        raw: Option<String>,
    },
    FunctionCall {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Operation {
        op: Operator,
        lhs: NodeId,
        rhs: NodeId,
        position: OpPosition,
    },
    Group(Vec<NodeId>),
    /// Unary minus
    Neg(NodeId),
}

impl Node {
    /// Children in source order.
    pub fn children(&self) -> SmallVec<[NodeId; 4]> {
        match self {
            Node::Root(child) | Node::Neg(child) => smallvec::smallvec![*child],
            Node::FunctionCall { callee, arguments } => {
                let mut out = SmallVec::with_capacity(arguments.len() + 1);
                out.push(*callee);
                out.extend(arguments.iter().copied());
                out
            }
            Node::Operation { lhs, rhs, .. } => smallvec::smallvec![*lhs, *rhs],
            Node::Group(items) => items.iter().copied().collect(),
            Node::Identifier(_) | Node::Integer(_) | Node::Float { .. } => SmallVec::new(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Root(_) => "Root",
            Node::Identifier(_) => "Identifier",
            Node::Integer(_) => "Integer",
            Node::Float { .. } => "Float",
            Node::FunctionCall { .. } => "FunctionCall",
            Node::Operation { .. } => "Operation",
            Node::Group(_) => "Group",
            Node::Neg(_) => "Neg",
        }
    }

    /// Re-point the first slot holding `old` at `new`.
    fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let slot = match self {
            Node::Root(child) | Node::Neg(child) => (*child == old).then_some(child),
            Node::FunctionCall { callee, arguments } => {
                if *callee == old {
                    Some(callee)
                } else {
                    arguments.iter_mut().find(|arg| **arg == old)
                }
            }
            Node::Operation { lhs, rhs, .. } => {
                if *lhs == old {
                    Some(lhs)
                } else if *rhs == old {
                    Some(rhs)
                } else {
                    None
                }
            }
            Node::Group(items) => items.iter_mut().find(|item| **item == old),
            Node::Identifier(_) | Node::Integer(_) | Node::Float { .. } => None,
        };
        match slot {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
}

/// A parsed expression rooted at a single [`Node::Root`].
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A fresh tree whose root holds an empty group as its body.
    pub fn new() -> Self {
        let root = NodeId(0);
        let body = NodeId(1);
        Self {
            slots: vec![
                Slot {
                    node: Node::Root(body),
                    parent: None,
                },
                Slot {
                    node: Node::Group(Vec::new()),
                    parent: Some(root),
                },
            ],
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root's single child.
    pub fn body(&self) -> NodeId {
        match self.get(self.root) {
            Node::Root(child) => *child,
            // The root slot is only ever written by `new`.
            other => unreachable!("root slot holds {}", other.kind_name()),
        }
    }

    /// Install `body` as the root's child, detaching whatever was there.
    pub fn set_body(&mut self, body: NodeId) -> Result<(), AstError> {
        let current = self.body();
        self.replace(current, body)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.slots[id.index()].node
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.index()].parent
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn arena_len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.parent(id).is_some()
    }

    /// Name of an identifier node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match self.get(id) {
            Node::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// True when `id` sits in the callee slot of its parent call.
    pub fn is_callee(&self, id: NodeId) -> bool {
        match self.parent(id).map(|p| self.get(p)) {
            Some(Node::FunctionCall { callee, .. }) => *callee == id,
            _ => false,
        }
    }

    /// Store `node` and point its children at it. A child's previous
    /// parent keeps its stale slot until it is replaced or detached.
    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        for child in node.children() {
            self.slots[child.index()].parent = Some(id);
        }
        self.slots.push(Slot { node, parent: None });
        id
    }

    pub fn ident(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(Node::Identifier(name.into()))
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.alloc(Node::Integer(value))
    }

    pub fn float(&mut self, value: f64, raw: Option<String>) -> NodeId {
        self.alloc(Node::Float { value, raw })
    }

    /// Build a call. `callee` and `arguments` are adopted by the new node;
    /// if they were attached elsewhere, that holder must be replaced before
    /// the tree validates again.
    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(Node::FunctionCall { callee, arguments })
    }

    /// Build a binary operation, adopting `lhs` and `rhs` as [`Tree::call`]
    /// adopts its children.
    pub fn op(&mut self, op: Operator, lhs: NodeId, rhs: NodeId, position: OpPosition) -> NodeId {
        self.alloc(Node::Operation {
            op,
            lhs,
            rhs,
            position,
        })
    }

    /// A synthesized multiplication with nothing between its operands.
    pub fn mul(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.op(Operator::Mul, lhs, rhs, OpPosition::Missing)
    }

    /// Parenthesised items, adopted as [`Tree::call`] adopts its children.
    pub fn group(&mut self, items: Vec<NodeId>) -> NodeId {
        self.alloc(Node::Group(items))
    }

    pub fn neg(&mut self, operand: NodeId) -> NodeId {
        self.alloc(Node::Neg(operand))
    }

    /// Swap the attached node `old` for the fresh subtree `new`.
    ///
    /// On success `new` occupies `old`'s slot under the same parent and
    /// `old` is detached.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), AstError> {
        if old == new {
            return Ok(());
        }
        if old == self.root {
            return Err(AstError::RootReplacement);
        }
        if new == self.root || self.parent(new).is_some() {
            return Err(AstError::AlreadyAttached(new));
        }
        let parent = self.parent(old).ok_or(AstError::Detached(old))?;

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == new {
                return Err(AstError::WouldCycle { node: new });
            }
            cursor = self.parent(id);
        }

        if !self.slots[parent.index()].node.replace_child(old, new) {
            return Err(AstError::Detached(old));
        }
        self.slots[new.index()].parent = Some(parent);
        self.slots[old.index()].parent = None;
        Ok(())
    }

    /// Check that the reachable tree is connected, acyclic and that every
    /// child points back at the node holding it.
    pub fn validate(&self) -> Result<(), AstError> {
        ensure_ast_invariant!(
            matches!(self.get(self.root), Node::Root(_)),
            "root slot holds {}",
            self.get(self.root).kind_name()
        );
        ensure_ast_invariant!(
            self.parent(self.root).is_none(),
            "root has a parent"
        );

        let mut seen = vec![false; self.slots.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            ensure_ast_invariant!(!seen[id.index()], "node {} is reachable twice", id);
            seen[id.index()] = true;
            for child in self.get(id).children() {
                ensure_ast_invariant!(
                    self.parent(child) == Some(id),
                    "node {} does not point back at its parent {}",
                    child,
                    id
                );
                ensure_ast_invariant!(
                    !matches!(self.get(child), Node::Root(_)),
                    "root node {} appears below {}",
                    child,
                    id
                );
                stack.push(child);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_empty_group_body() {
        let tree = Tree::new();
        let body = tree.body();
        assert_eq!(tree.get(body), &Node::Group(vec![]));
        assert_eq!(tree.parent(body), Some(tree.root()));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_constructors_adopt_children() {
        let mut tree = Tree::new();
        let f = tree.ident("f");
        let x = tree.ident("x");
        let call = tree.call(f, vec![x]);
        assert_eq!(tree.parent(f), Some(call));
        assert_eq!(tree.parent(x), Some(call));
        assert!(tree.is_callee(f));
        assert!(!tree.is_callee(x));
    }

    #[test]
    fn test_replace_repoints_parent_slot() {
        let mut tree = Tree::new();
        let x = tree.ident("x");
        let y = tree.ident("y");
        let sum = tree.op(Operator::Add, x, y, OpPosition::Source(Span::at(1)));
        tree.set_body(sum).unwrap();

        let two = tree.int(2);
        tree.replace(y, two).unwrap();

        match tree.get(sum) {
            Node::Operation { rhs, .. } => assert_eq!(*rhs, two),
            other => panic!("expected operation, got {:?}", other),
        }
        assert_eq!(tree.parent(two), Some(sum));
        assert_eq!(tree.parent(y), None);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_replace_rejects_root_and_detached() {
        let mut tree = Tree::new();
        let x = tree.ident("x");
        let y = tree.ident("y");
        assert_eq!(tree.replace(tree.root(), x), Err(AstError::RootReplacement));
        assert_eq!(tree.replace(x, y), Err(AstError::Detached(x)));
    }

    #[test]
    fn test_replace_rejects_attached_replacement() {
        let mut tree = Tree::new();
        let x = tree.ident("x");
        let y = tree.ident("y");
        let g = tree.group(vec![x, y]);
        tree.set_body(g).unwrap();
        assert_eq!(tree.replace(x, y), Err(AstError::AlreadyAttached(y)));
    }

    #[test]
    fn test_replace_with_reused_children() {
        // f(x) becomes f*(x), reusing both the callee and the argument.
        let mut tree = Tree::new();
        let f = tree.ident("f");
        let x = tree.ident("x");
        let call = tree.call(f, vec![x]);
        tree.set_body(call).unwrap();

        let args = tree.group(vec![x]);
        let product = tree.mul(f, args);
        tree.replace(call, product).unwrap();

        assert_eq!(tree.body(), product);
        assert_eq!(tree.parent(call), None);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_adopted_child_leaves_stale_holder_until_replaced() {
        let mut tree = Tree::new();
        let x = tree.ident("x");
        let held = tree.group(vec![x]);
        tree.set_body(held).unwrap();

        let neg = tree.neg(x);
        assert_eq!(tree.parent(x), Some(neg));
        // `held` still lists x, which now points elsewhere.
        let checked = std::panic::catch_unwind(|| tree.validate());
        assert!(!matches!(checked, Ok(Ok(()))));

        tree.replace(held, neg).unwrap();
        assert_eq!(tree.body(), neg);
        assert!(tree.validate().is_ok());
    }
}
