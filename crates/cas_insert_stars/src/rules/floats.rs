//! Exponent-notation literals the grammar does not accept as numbers.
//!
//! `1e-3` is deliberately not read as a power of ten. It becomes
//! `1*e-3`, so the student is pushed towards writing `1*10^-3`.

use crate::define_rule;
use crate::names;
use crate::rule::Rewrite;
use cas_ast::{Node, OpPosition, Operator};

define_rule!(
    /// Floats whose raw text carries an `e` or `E` marker. Outside strict
    /// syntax only.
    ExponentLiteralRule,
    "Split Exponent Literal",
    |tree, node, options| {
        if options.strict_syntax {
            return Ok(None);
        }
        let Node::Float { raw: Some(raw), .. } = tree.get(node) else {
            return Ok(None);
        };
        let Some(marker) = ['e', 'E'].into_iter().find(|m| raw.contains(*m)) else {
            return Ok(None);
        };
        let Some((mantissa, exponent)) = raw.split_once(marker) else {
            return Ok(None);
        };

        let sign = exponent.chars().next().and_then(Operator::from_sign);
        let exponent_value = names::parse_int_prefix(exponent)?;
        let decimal_mantissa = mantissa.contains('.');
        let mantissa_value = if decimal_mantissa {
            None
        } else {
            Some(names::parse_int_prefix(mantissa)?)
        };
        let mantissa_float = names::parse_float_prefix(mantissa);

        let mantissa_node = match mantissa_value {
            Some(value) => tree.int(value),
            None => tree.float(mantissa_float, None),
        };
        let marker_node = tree.ident(marker.to_string());
        let replacement = match sign {
            // 1e-3 -> (1*e)-3
            Some(op) => {
                let scaled = tree.mul(mantissa_node, marker_node);
                let magnitude = tree.int(exponent_value.abs());
                tree.op(op, scaled, magnitude, OpPosition::Missing)
            }
            // 1e3 -> 1*(e*3)
            None => {
                let power = tree.int(exponent_value);
                let tail = tree.mul(marker_node, power);
                tree.mul(mantissa_node, tail)
            }
        };
        Ok(Some(
            Rewrite::new(node, replacement).desc("exponent marker read as a variable"),
        ))
    }
);
