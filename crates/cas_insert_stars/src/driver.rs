//! Fixed-point rewrite driver.
//!
//! Each pass walks the tree from the root and tries the rule battery at every
//! node. The first rule that fires has its replacement swapped in, and the
//! pass starts over from the root, so node ids from before a swap are never
//! reused. A pass that fires nothing ends the loop.
//!
//! A node whose digits do not fit an integer is reported once and skipped
//! for the rest of the run; the other nodes are still rewritten.

use crate::diagnostics::Diagnostic;
use crate::error::RewriteError;
use crate::options::RewriteOptions;
use crate::outcome::{AnswerNote, Outcome};
use crate::rule::{Rewrite, StarRule};
use crate::rules::default_rules;
use cas_ast::traversal::text_weight;
use cas_ast::{Node, NodeId, Tree};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Counters for one call of [`Rewriter::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub rewrites: usize,
    /// Full walks of the tree, the final quiet one included
    pub passes: usize,
    /// Nodes left as they were because a digit run overflowed
    pub skipped: usize,
}

pub struct Rewriter {
    rules: Vec<Arc<dyn StarRule>>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl Rewriter {
    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    /// A driver over a custom battery. Order is precedence.
    pub fn new(rules: Vec<Arc<dyn StarRule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Arc<dyn StarRule>] {
        &self.rules
    }

    /// Rewrite `tree` until no rule fires.
    ///
    /// Every rewrite appends [`AnswerNote::MissingStars`]; unless
    /// `permit_implicit` is set it also invalidates the outcome. An
    /// overflowing digit run invalidates it regardless, with an
    /// [`AnswerNote::IntegerOverflow`] note and diagnostic.
    pub fn run(
        &self,
        tree: &mut Tree,
        outcome: &mut Outcome,
        permit_implicit: bool,
        options: &RewriteOptions,
    ) -> Result<RewriteStats, RewriteError> {
        let limit = iteration_limit(tree);
        let mut stats = RewriteStats::default();
        let mut skipped = FxHashSet::default();

        tracing::debug!(
            target: "insert_stars",
            limit,
            strict = options.strict_syntax,
            permit_implicit,
            "rewrite_start"
        );

        loop {
            stats.passes += 1;
            let Some((rule, rewrite)) = self.pass(tree, outcome, &mut skipped, options)? else {
                break;
            };
            if stats.rewrites >= limit {
                tracing::warn!(
                    target: "insert_stars",
                    rule,
                    limit,
                    "rewrite limit reached without a fixed point"
                );
                return Err(RewriteError::IterationLimit { limit });
            }

            tracing::debug!(
                target: "insert_stars",
                rule,
                node = %rewrite.target,
                description = %rewrite.description,
                "rule_fired"
            );
            tree.replace(rewrite.target, rewrite.replacement)?;
            stats.rewrites += 1;

            outcome.push_note(AnswerNote::MissingStars);
            if !permit_implicit {
                outcome.invalidate();
            }
        }

        stats.skipped = skipped.len();
        tracing::debug!(
            target: "insert_stars",
            rewrites = stats.rewrites,
            passes = stats.passes,
            skipped = stats.skipped,
            valid = outcome.is_valid(),
            "rewrite_fixed_point"
        );
        Ok(stats)
    }

    /// One walk. Returns the first rewrite found, with the name of its rule.
    fn pass<'r>(
        &'r self,
        tree: &mut Tree,
        outcome: &mut Outcome,
        skipped: &mut FxHashSet<NodeId>,
        options: &RewriteOptions,
    ) -> Result<Option<(&'r str, Rewrite)>, RewriteError> {
        for node in visit_order(tree) {
            if skipped.contains(&node) {
                continue;
            }
            for rule in &self.rules {
                match rule.apply(tree, node, options) {
                    Ok(Some(rewrite)) => return Ok(Some((rule.name(), rewrite))),
                    Ok(None) => {}
                    // Rules read every number before allocating, so the tree
                    // is unchanged here.
                    Err(RewriteError::IntegerOverflow { digits }) => {
                        tracing::warn!(
                            target: "insert_stars",
                            rule = rule.name(),
                            node = %node,
                            %digits,
                            "digit run overflows an integer"
                        );
                        skipped.insert(node);
                        outcome.invalidate();
                        outcome.push_note(AnswerNote::IntegerOverflow);
                        outcome.push_error(Diagnostic::IntegerOverflow { digits });
                        break;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(None)
    }
}

/// Depth-first order from the root, children in source order.
///
/// A call with a plain name as callee is preceded by that callee, so a name
/// carrying digits is split before the call around it is reinterpreted.
pub fn visit_order(tree: &Tree) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match tree.get(id) {
            Node::FunctionCall { callee, arguments }
                if matches!(tree.get(*callee), Node::Identifier(_)) =>
            {
                order.push(*callee);
                order.push(id);
                stack.extend(arguments.iter().rev().copied());
            }
            node => {
                order.push(id);
                stack.extend(node.children().into_iter().rev());
            }
        }
    }
    order
}

/// Upper bound on rewrites for one run over `tree`.
///
/// Every rewrite either consumes a piece of some name or literal or turns a
/// call into a product, so a well-behaved battery stays far below this.
pub fn iteration_limit(tree: &Tree) -> usize {
    let (nodes, text) = text_weight(tree, tree.root());
    8 * (nodes + text) + 32
}

/// Run the default battery over `tree`.
pub fn rewrite(
    tree: &mut Tree,
    outcome: &mut Outcome,
    permit_implicit: bool,
    options: &RewriteOptions,
) -> Result<RewriteStats, RewriteError> {
    Rewriter::with_default_rules().run(tree, outcome, permit_implicit, options)
}
