//! Student-facing diagnostics built from the rewritten tree.
//!
//! A diagnostic is only produced for an answer already marked invalid, and
//! only when both the answer note and a matching synthesized star are
//! present: the note says a rewrite happened, the star says where. Permitted
//! rewrites stay silent.

use crate::outcome::{AnswerNote, Outcome};
use cas_ast::traversal::any_node;
use cas_ast::{DisplayTree, Node, OpPosition, Operator, StarHighlight, Tree};
use std::fmt;

/// Placeholder the tokenizer substitutes for `?` in student input.
pub const QMCHAR: &str = "QMCHAR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `expr` is the tree with inserted stars highlighted
    MissingStars { expr: String },
    /// `expr` is the tree with whitespace products highlighted
    Spaces { expr: String },
    IntegerOverflow { digits: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingStars { expr } => write!(
                f,
                "You seem to be missing * characters. Perhaps you meant to type \
                 <span class=\"stacksyntaxexample\">{}</span>.",
                expr
            ),
            Diagnostic::Spaces { expr } => write!(
                f,
                "Illegal spaces found in expression \
                 <span class=\"stacksyntaxexample\">{}</span>.",
                expr
            ),
            Diagnostic::IntegerOverflow { digits } => write!(
                f,
                "The number <span class=\"stacksyntaxexample\">{}</span> is too large.",
                digits
            ),
        }
    }
}

/// True when the tree holds a `*` synthesized with the given provenance.
pub fn has_synthesized_star(tree: &Tree, position: OpPosition) -> bool {
    any_node(tree, tree.root(), |node| {
        matches!(
            node,
            Node::Operation { op: Operator::Mul, position: p, .. } if *p == position
        )
    })
}

/// The whole tree as student-facing text with the chosen stars marked.
pub fn render_marked(tree: &Tree, highlight: StarHighlight) -> String {
    DisplayTree::new(tree, tree.root())
        .with_highlight(highlight)
        .to_string()
        .replace(QMCHAR, "?")
}

/// Append the diagnostics the current tree and notes call for.
pub fn extract_diagnostics(tree: &Tree, outcome: &mut Outcome) {
    if outcome.is_valid() {
        return;
    }
    if outcome.has_note(&AnswerNote::MissingStars)
        && has_synthesized_star(tree, OpPosition::Missing)
    {
        outcome.push_error(Diagnostic::MissingStars {
            expr: render_marked(tree, StarHighlight::Missing),
        });
    }
    if outcome.has_note(&AnswerNote::Spaces) && has_synthesized_star(tree, OpPosition::Whitespace)
    {
        outcome.push_error(Diagnostic::Spaces {
            expr: render_marked(tree, StarHighlight::Whitespace),
        });
    }
}
