//! The ambiguity battery, in precedence order.
//!
//! Rules on calls come first, then rules on identifiers, then the exponent
//! literal rule. For a given node the first rule that matches wins.

pub mod calls;
pub mod floats;
pub mod identifiers;

use crate::rule::StarRule;
use cas_ast::{Node, NodeId, Tree};
use std::sync::Arc;

pub use calls::{CallOfCallRule, FunctionNameShapeRule};
pub use floats::ExponentLiteralRule;
pub use identifiers::{DigitRunSplitRule, LetterDigitRule, TrailingDigitsRule};

pub fn default_rules() -> Vec<Arc<dyn StarRule>> {
    vec![
        Arc::new(CallOfCallRule),
        Arc::new(FunctionNameShapeRule),
        Arc::new(LetterDigitRule),
        Arc::new(DigitRunSplitRule),
        Arc::new(TrailingDigitsRule),
        Arc::new(ExponentLiteralRule),
    ]
}

/// Callee and arguments of a call node.
fn call_parts(tree: &Tree, id: NodeId) -> Option<(NodeId, Vec<NodeId>)> {
    match tree.get(id) {
        Node::FunctionCall { callee, arguments } => Some((*callee, arguments.clone())),
        _ => None,
    }
}

/// The call an identifier is the callee of, with that call's arguments.
fn enclosing_call(tree: &Tree, id: NodeId) -> Option<(NodeId, Vec<NodeId>)> {
    if !tree.is_callee(id) {
        return None;
    }
    let call = tree.parent(id)?;
    let (_, arguments) = call_parts(tree, call)?;
    Some((call, arguments))
}
