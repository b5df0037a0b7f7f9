//! Display formatting for trees
//!
//! Output is compact maxima-style text (`x*12*(y)`), the form students type
//! and the form diagnostics echo back to them. Explicit groups are printed
//! as written; extra parentheses appear only where operator precedence
//! would otherwise change the reading.
//!
//! Rendering recurses once per nesting level, unlike the explicit-stack
//! walks in [`crate::traversal`]. Depth is bounded by what the parser
//! accepts from a single answer.

use crate::expression::{Node, NodeId, OpPosition, Operator, Tree};
use std::fmt;

/// Which synthesized multiplications, if any, to mark in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarHighlight {
    #[default]
    None,
    /// Mark stars inserted where nothing separated the operands
    Missing,
    /// Mark stars inserted where only whitespace separated the operands
    Whitespace,
}

/// Color used for highlighted stars
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightColor {
    Red,
}

impl HighlightColor {
    pub fn to_html(&self) -> &'static str {
        match self {
            HighlightColor::Red => "red",
        }
    }
}

/// Atoms, calls and groups never need wrapping.
const ATOM_PRECEDENCE: u8 = u8::MAX;
/// Binds like `+`/`-` from outside, like `*` towards its operand.
const NEG_PRECEDENCE: u8 = 1;

pub struct DisplayTree<'a> {
    pub tree: &'a Tree,
    pub id: NodeId,
    pub highlight: StarHighlight,
}

impl<'a> DisplayTree<'a> {
    pub fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self {
            tree,
            id,
            highlight: StarHighlight::None,
        }
    }

    pub fn with_highlight(mut self, highlight: StarHighlight) -> Self {
        self.highlight = highlight;
        self
    }

    fn precedence(&self, id: NodeId) -> u8 {
        match self.tree.get(id) {
            Node::Operation { op, .. } => op.precedence(),
            Node::Root(child) => self.precedence(*child),
            Node::Neg(_) => NEG_PRECEDENCE,
            _ => ATOM_PRECEDENCE,
        }
    }

    fn operator_text(&self, op: Operator, position: OpPosition) -> String {
        let marked = match (op, self.highlight, position) {
            (Operator::Mul, StarHighlight::Missing, OpPosition::Missing) => Some("*"),
            (Operator::Mul, StarHighlight::Whitespace, OpPosition::Whitespace) => Some("_"),
            _ => None,
        };
        match marked {
            Some(glyph) => format!(
                "<font color=\"{}\">{}</font>",
                HighlightColor::Red.to_html(),
                glyph
            ),
            None => op.symbol().to_string(),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, id: NodeId, min: u8) -> fmt::Result {
        if self.precedence(id) < min {
            write!(f, "(")?;
            self.fmt_node(f, id)?;
            write!(f, ")")
        } else {
            self.fmt_node(f, id)
        }
    }

    fn fmt_list(&self, f: &mut fmt::Formatter<'_>, items: &[NodeId]) -> fmt::Result {
        write!(f, "(")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            self.fmt_node(f, *item)?;
        }
        write!(f, ")")
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        match self.tree.get(id) {
            Node::Root(child) => self.fmt_node(f, *child),
            Node::Identifier(name) => write!(f, "{}", name),
            Node::Integer(n) => write!(f, "{}", n),
            Node::Float { raw: Some(raw), .. } => write!(f, "{}", raw),
            Node::Float { value, raw: None } => write!(f, "{:?}", value),
            Node::FunctionCall { callee, arguments } => {
                self.fmt_operand(f, *callee, ATOM_PRECEDENCE)?;
                self.fmt_list(f, arguments)
            }
            Node::Group(items) => self.fmt_list(f, items),
            Node::Neg(operand) => {
                write!(f, "-")?;
                self.fmt_operand(f, *operand, Operator::Mul.precedence())
            }
            Node::Operation {
                op,
                lhs,
                rhs,
                position,
            } => {
                let prec = op.precedence();
                // Sub and Div are left-associative, Pow right-associative.
                let (lhs_min, rhs_min) = match op {
                    Operator::Add | Operator::Mul => (prec, prec),
                    Operator::Sub | Operator::Div => (prec, prec + 1),
                    Operator::Pow => (prec + 1, prec),
                };
                self.fmt_operand(f, *lhs, lhs_min)?;
                write!(f, "{}", self.operator_text(*op, *position))?;
                self.fmt_operand(f, *rhs, rhs_min)
            }
        }
    }
}

impl<'a> fmt::Display for DisplayTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.id)
    }
}
