//! Rules on call nodes: calling something that is not a plain name, and
//! names students are not allowed to call.

use super::call_parts;
use crate::define_rule;
use crate::names;
use crate::rule::Rewrite;
use cas_ast::Node;

// a(x)(y) -> a(x)*(y), (x)(y) -> (x)*(y)
define_rule!(
    /// A call whose callee is itself a call or a parenthesised group.
    CallOfCallRule,
    "Call Of Call",
    |tree, node, options| {
        let Some((callee, arguments)) = call_parts(tree, node) else {
            return Ok(None);
        };
        if !matches!(tree.get(callee), Node::FunctionCall { .. } | Node::Group(_)) {
            return Ok(None);
        }
        let args = tree.group(arguments);
        let product = tree.mul(callee, args);
        Ok(Some(
            Rewrite::new(node, product).desc("call of a call is a product"),
        ))
    }
);

// f2(x) -> f2*(x), i(x) -> i*(x), and f(x) -> f*(x) outside strict syntax
define_rule!(
    /// Names that cannot be student functions are read as a factor times a
    /// parenthesised expression.
    FunctionNameShapeRule,
    "Function Name Shape",
    |tree, node, options| {
        let Some((callee, arguments)) = call_parts(tree, node) else {
            return Ok(None);
        };
        let Some(name) = tree.name(callee) else {
            return Ok(None);
        };
        if names::is_exempt_callee_name(name, options) {
            return Ok(None);
        }

        let description = if name.ends_with(|c: char| c.is_ascii_digit()) {
            "function names may not end in a digit"
        } else if name == "i" {
            "i is the imaginary unit, not a function"
        } else if !options.strict_syntax && name.chars().count() == 1 {
            "single-letter names are not functions"
        } else {
            return Ok(None);
        };

        let args = tree.group(arguments);
        let product = tree.mul(callee, args);
        Ok(Some(Rewrite::new(node, product).desc(description)))
    }
);
