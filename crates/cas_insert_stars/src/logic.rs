//! The insert-stars pass as a host application uses it.
//!
//! [`InsertStars`] sequences the stages for one student answer:
//!
//! 1. the external [`Preparser`] turns raw text into a tree
//! 2. the `before` hook
//! 3. the rewrite driver
//! 4. the `after` hook
//! 5. diagnostics extraction
//!
//! Oversized digit runs are reported on the [`Outcome`] by the driver and
//! never stop the pass. A [`RewriteError`] escaping the driver is fatal.

use crate::diagnostics::extract_diagnostics;
use crate::driver::{RewriteStats, Rewriter};
use crate::error::RewriteError;
use crate::options::RewriteOptions;
use crate::outcome::Outcome;
use cas_ast::Tree;

/// Extension point run around the rewrite. Hooks may edit the tree and the
/// outcome; like everything else they can only clear validity.
pub type Hook = Box<dyn FnMut(&mut Tree, &mut Outcome, &RewriteOptions)>;

#[derive(Default)]
pub struct Hooks {
    pub before: Option<Hook>,
    pub after: Option<Hook>,
}

impl Hooks {
    pub fn before(mut self, hook: impl FnMut(&mut Tree, &mut Outcome, &RewriteOptions) + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    pub fn after(mut self, hook: impl FnMut(&mut Tree, &mut Outcome, &RewriteOptions) + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }
}

/// Tokenizer and parser for raw student text.
///
/// `insert_stars` and `fix_spaces` are passed through so the parser can
/// decide how to treat whitespace between operands. Returns `None` when the
/// text does not parse; the parser records why on `outcome`.
pub trait Preparser {
    fn preparse(
        &self,
        input: &str,
        outcome: &mut Outcome,
        insert_stars: bool,
        fix_spaces: bool,
    ) -> Option<Tree>;
}

pub struct InsertStars {
    insert_stars: bool,
    fix_spaces: bool,
    hooks: Hooks,
    rewriter: Rewriter,
}

impl InsertStars {
    /// `insert_stars` permits implicit multiplication: rewrites are still
    /// made and noted, but the answer stays valid.
    pub fn new(insert_stars: bool, fix_spaces: bool) -> Self {
        Self {
            insert_stars,
            fix_spaces,
            hooks: Hooks::default(),
            rewriter: Rewriter::with_default_rules(),
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_rewriter(mut self, rewriter: Rewriter) -> Self {
        self.rewriter = rewriter;
        self
    }

    pub fn insert_stars(&self) -> bool {
        self.insert_stars
    }

    pub fn fix_spaces(&self) -> bool {
        self.fix_spaces
    }

    /// Parse `input` and run the pass over it. `Ok(None)` when nothing parsed.
    pub fn parse<P: Preparser + ?Sized>(
        &mut self,
        input: &str,
        preparser: &P,
        outcome: &mut Outcome,
        options: &RewriteOptions,
    ) -> Result<Option<Tree>, RewriteError> {
        let Some(mut tree) =
            preparser.preparse(input, outcome, self.insert_stars, self.fix_spaces)
        else {
            tracing::debug!(target: "insert_stars", "preparse produced no tree");
            return Ok(None);
        };
        self.process(&mut tree, outcome, options)?;
        Ok(Some(tree))
    }

    /// Run the pass over an already parsed tree.
    pub fn process(
        &mut self,
        tree: &mut Tree,
        outcome: &mut Outcome,
        options: &RewriteOptions,
    ) -> Result<RewriteStats, RewriteError> {
        if let Some(hook) = self.hooks.before.as_mut() {
            hook(tree, outcome, options);
        }

        let stats = self.rewriter.run(tree, outcome, self.insert_stars, options)?;

        if let Some(hook) = self.hooks.after.as_mut() {
            hook(tree, outcome, options);
        }
        extract_diagnostics(tree, outcome);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::outcome::AnswerNote;
    use cas_ast::{DisplayTree, Node};

    fn ident_tree(name: &str) -> Tree {
        let mut tree = Tree::new();
        let id = tree.ident(name);
        tree.set_body(id).unwrap();
        tree
    }

    #[test]
    fn test_process_rewrites_and_reports() {
        let mut tree = ident_tree("x3");
        let mut outcome = Outcome::new();
        InsertStars::new(false, false)
            .process(&mut tree, &mut outcome, &RewriteOptions::default())
            .unwrap();

        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors().len(), 1);
        assert!(matches!(outcome.errors()[0], Diagnostic::MissingStars { .. }));
    }

    #[test]
    fn test_hooks_run_in_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let log = Rc::new(RefCell::new(Vec::new()));
        let before_log = Rc::clone(&log);
        let after_log = Rc::clone(&log);
        let hooks = Hooks::default()
            .before(move |tree, _, _| {
                let name = tree.name(tree.body()).unwrap_or_default().to_string();
                before_log.borrow_mut().push(format!("before {name}"));
            })
            .after(move |tree, outcome, _| {
                let rendered = DisplayTree::new(tree, tree.root()).to_string();
                after_log
                    .borrow_mut()
                    .push(format!("after {rendered} {}", outcome.errors().len()));
            });

        let mut tree = ident_tree("x3");
        let mut outcome = Outcome::new();
        InsertStars::new(true, false)
            .with_hooks(hooks)
            .process(&mut tree, &mut outcome, &RewriteOptions::default())
            .unwrap();

        // The after hook sees the rewritten tree, before diagnostics exist.
        assert_eq!(*log.borrow(), vec!["before x3", "after x*3 0"]);
        // Permitted rewrites are silent.
        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_overflow_becomes_outcome_entry() {
        let mut tree = ident_tree("x99999999999999999999");
        let mut outcome = Outcome::new();
        let stats = InsertStars::new(true, false)
            .process(&mut tree, &mut outcome, &RewriteOptions::default())
            .unwrap();

        assert_eq!(stats.rewrites, 0);
        assert!(!outcome.is_valid());
        assert!(outcome.has_note(&AnswerNote::IntegerOverflow));
        assert_eq!(
            outcome.errors(),
            &[Diagnostic::IntegerOverflow {
                digits: "99999999999999999999".to_string()
            }]
        );
        assert_eq!(
            tree.get(tree.body()),
            &Node::Identifier("x99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_overflow_does_not_stop_other_rewrites() {
        // x99999999999999999999 + a1b2c
        let mut tree = Tree::new();
        let big = tree.ident("x99999999999999999999");
        let mixed = tree.ident("a1b2c");
        let sum = tree.op(cas_ast::Operator::Add, big, mixed, cas_ast::OpPosition::Missing);
        tree.set_body(sum).unwrap();

        let mut outcome = Outcome::new();
        InsertStars::new(false, false)
            .process(&mut tree, &mut outcome, &RewriteOptions::default())
            .unwrap();

        assert_eq!(
            DisplayTree::new(&tree, tree.root()).to_string(),
            "x99999999999999999999+a*1*b*2*c"
        );
        assert_eq!(
            outcome.notes().iter().filter(|n| **n == AnswerNote::IntegerOverflow).count(),
            1
        );
        assert!(matches!(
            outcome.errors(),
            [Diagnostic::IntegerOverflow { .. }, Diagnostic::MissingStars { .. }]
        ));
    }
}
