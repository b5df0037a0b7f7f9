//! Name inspection shared by the rules: exemptions, digit-run segmentation
//! and the integer readings of split-off digits.

use crate::error::RewriteError;
use crate::options::RewriteOptions;
use cas_ast::{NodeId, Tree};

/// `log10` and `log_<base>` are rebuilt as calls by a later stage and must
/// reach it intact.
pub fn is_log_name(name: &str) -> bool {
    name == "log10" || name.starts_with("log_")
}

/// Whether a name in the callee slot is left alone.
pub fn is_exempt_callee_name(name: &str, options: &RewriteOptions) -> bool {
    is_log_name(name) || options.is_safe_function(name)
}

/// Whether the name at `id` is kept whole by the splitting rules.
///
/// A value is checked against the safe variables. A callee is kept whole
/// when it is in either safe set: a called safe variable is still read as a
/// product with its arguments, but by the call rule, so the name survives.
pub fn is_exempt_identifier(tree: &Tree, id: NodeId, options: &RewriteOptions) -> bool {
    let Some(name) = tree.name(id) else {
        return false;
    };
    if is_log_name(name) || options.is_safe_variable(name) {
        return true;
    }
    tree.is_callee(id) && options.is_safe_function(name)
}

pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Cut a name before every non-digit that directly follows a digit.
///
/// Each piece is a non-digit run with its trailing digits: `a1b2c` gives
/// `a1`, `b2`, `c`. A leading digit run stands alone: `12ab` gives `12`,
/// `ab`.
pub fn split_digit_runs(name: &str) -> Vec<&str> {
    let mut chars = name.char_indices();
    let Some((_, first)) = chars.next() else {
        return Vec::new();
    };
    let mut segments = Vec::new();
    let mut in_digits = first.is_ascii_digit();
    let mut start = 0;
    for (i, c) in chars {
        let digit = c.is_ascii_digit();
        if !in_digits && digit {
            in_digits = true;
        } else if in_digits && !digit {
            segments.push(&name[start..i]);
            start = i;
            in_digits = false;
        }
    }
    segments.push(&name[start..]);
    segments
}

/// Byte offset of the first ASCII digit.
pub fn first_digit(name: &str) -> Option<usize> {
    name.bytes().position(|b| b.is_ascii_digit())
}

/// Integer value of a run already known to be all digits.
pub fn parse_digits(digits: &str) -> Result<i64, RewriteError> {
    digits
        .parse::<i64>()
        .map_err(|_| RewriteError::IntegerOverflow {
            digits: digits.to_string(),
        })
}

/// Lenient integer reading: optional sign, then the leading digits.
/// Anything after them is ignored; no digits at all reads as zero.
pub fn parse_int_prefix(text: &str) -> Result<i64, RewriteError> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return Ok(0);
    }
    let magnitude = parse_digits(&rest[..end])?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Lenient decimal reading of a mantissa such as `1.5` or `.25`.
pub fn parse_float_prefix(text: &str) -> f64 {
    let mut seen_dot = false;
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            let accepted = c.is_ascii_digit()
                || (i == 0 && (c == '+' || c == '-'))
                || (c == '.' && !seen_dot);
            if c == '.' {
                seen_dot = true;
            }
            !accepted
        })
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse::<f64>().unwrap_or(0.0)
}
