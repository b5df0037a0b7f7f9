//! Rules on names that mix letters and digits.

use super::enclosing_call;
use crate::define_rule;
use crate::error::RewriteError;
use crate::names;
use crate::rule::Rewrite;
use cas_ast::{NodeId, Tree};

// x3 -> x*3
define_rule!(
    /// Two-character letter+digit value names. Outside strict syntax only.
    LetterDigitRule,
    "Letter Digit Pair",
    |tree, node, options| {
        if options.strict_syntax || tree.is_callee(node) {
            return Ok(None);
        }
        if names::is_exempt_identifier(tree, node, options) {
            return Ok(None);
        }
        let Some(name) = tree.name(node) else {
            return Ok(None);
        };
        let mut chars = name.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Ok(None);
        };
        if !letter.is_ascii_alphabetic() {
            return Ok(None);
        }
        let Some(value) = digit.to_digit(10) else {
            return Ok(None);
        };

        let lhs = tree.ident(letter.to_string());
        let rhs = tree.int(i64::from(value));
        let product = tree.mul(lhs, rhs);
        Ok(Some(Rewrite::new(node, product).desc("letter followed by a digit")))
    }
);

// a1b2c -> a1*(b2*c), a1b(x) -> a1*b(x)
define_rule!(
    /// Names where letters resume after a digit run are products of their
    /// pieces. A callee keeps its arguments on the last piece.
    DigitRunSplitRule,
    "Split Digit Runs",
    |tree, node, options| {
        let Some(name) = tree.name(node) else {
            return Ok(None);
        };
        if names::is_exempt_identifier(tree, node, options) {
            return Ok(None);
        }
        let segments: Vec<String> = names::split_digit_runs(name)
            .into_iter()
            .map(str::to_owned)
            .collect();
        if segments.len() < 2 {
            return Ok(None);
        }

        // Read every number before allocating, so an overflow leaves the tree as it was.
        let values = segments
            .iter()
            .map(|segment| {
                if names::is_all_digits(segment) {
                    names::parse_digits(segment).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<_>, RewriteError>>()?;

        let call = enclosing_call(tree, node);
        let mut pieces = segments.iter().zip(values).rev();
        let Some((last, last_value)) = pieces.next() else {
            return Ok(None);
        };
        let mut chain = match (&call, last_value) {
            (Some((_, arguments)), Some(value)) => {
                let number = tree.int(value);
                let args = tree.group(arguments.clone());
                tree.mul(number, args)
            }
            (Some((_, arguments)), None) => {
                let callee = tree.ident(last.clone());
                tree.call(callee, arguments.clone())
            }
            (None, value) => segment_node(tree, last, value),
        };
        for (segment, value) in pieces {
            let factor = segment_node(tree, segment, value);
            chain = tree.mul(factor, chain);
        }

        let target = call.map_or(node, |(call, _)| call);
        Ok(Some(Rewrite::new(target, chain).desc(format!(
            "split into {} factors",
            segments.len()
        ))))
    }
);

// xyz12 -> xyz*12, x12(y) -> x*(12*(y))
define_rule!(
    /// Names ending in a digit run. Outside strict syntax only.
    TrailingDigitsRule,
    "Split Trailing Digits",
    |tree, node, options| {
        if options.strict_syntax {
            return Ok(None);
        }
        let Some(name) = tree.name(node) else {
            return Ok(None);
        };
        if names::is_exempt_identifier(tree, node, options) {
            return Ok(None);
        }
        if names::split_digit_runs(name).len() != 1 {
            return Ok(None);
        }
        let Some(split) = names::first_digit(name).filter(|&i| i > 0) else {
            return Ok(None);
        };
        let (prefix, digits) = name.split_at(split);
        if !names::is_all_digits(digits) {
            return Ok(None);
        }
        let value = names::parse_digits(digits)?;
        let prefix = prefix.to_owned();

        let call = enclosing_call(tree, node);
        let lhs = tree.ident(prefix);
        let number = tree.int(value);
        let rhs = match &call {
            Some((_, arguments)) => {
                let args = tree.group(arguments.clone());
                tree.mul(number, args)
            }
            None => number,
        };
        let product = tree.mul(lhs, rhs);

        let target = call.map_or(node, |(call, _)| call);
        Ok(Some(Rewrite::new(target, product).desc("name ends in a number")))
    }
);

fn segment_node(tree: &mut Tree, segment: &str, value: Option<i64>) -> NodeId {
    match value {
        Some(value) => tree.int(value),
        None => tree.ident(segment),
    }
}
