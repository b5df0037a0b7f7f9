//! Property tests over generated names, calls and float literals.
//!
//! Digit runs are kept short so no generated input overflows an integer.

mod support;

use cas_ast::traversal::count_nodes_matching;
use cas_ast::{Node, OpPosition, Operator, Tree};
use cas_insert_stars::names::split_digit_runs;
use cas_insert_stars::{rewrite, Outcome, RewriteOptions};
use proptest::prelude::*;
use support::{call, ident, raw_float, render, tree_with};

fn mixed_name() -> impl Strategy<Value = String> {
    "[a-z]{1,3}([0-9]{1,3}[a-z]{1,3}){0,3}[0-9]{0,3}"
}

/// Raw float text with an exponent marker, such as `12.5e-3`.
fn exponent_literal() -> impl Strategy<Value = String> {
    "[0-9]{1,3}(\\.[0-9]{1,2})?[eE][+-]?[0-9]{1,3}"
}

/// Small answers: a name, `name(arg)`, `name(a)(b)` or a raw float.
fn answer() -> impl Strategy<Value = Tree> {
    prop_oneof![
        mixed_name().prop_map(|name| ident(&name)),
        (mixed_name(), mixed_name()).prop_map(|(name, arg)| call(&name, &arg)),
        (mixed_name(), mixed_name(), mixed_name()).prop_map(|(name, a, b)| {
            tree_with(|t| {
                let callee = t.ident(name);
                let a = t.ident(a);
                let inner = t.call(callee, vec![a]);
                let b = t.ident(b);
                t.call(inner, vec![b])
            })
        }),
        exponent_literal().prop_map(|raw| raw_float(&raw)),
    ]
}

fn missing_stars(tree: &cas_ast::Tree) -> usize {
    count_nodes_matching(tree, tree.root(), |node| {
        matches!(
            node,
            Node::Operation {
                op: Operator::Mul,
                position: OpPosition::Missing,
                ..
            }
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A second run over a normalised tree changes nothing.
    #[test]
    fn rewrite_is_idempotent(name in mixed_name(), strict in any::<bool>()) {
        let options = RewriteOptions { strict_syntax: strict, ..RewriteOptions::default() };
        let mut tree = ident(&name);
        rewrite(&mut tree, &mut Outcome::new(), false, &options).unwrap();
        let first = render(&tree);

        let mut outcome = Outcome::new();
        let stats = rewrite(&mut tree, &mut outcome, false, &options).unwrap();
        prop_assert_eq!(stats.rewrites, 0);
        prop_assert_eq!(render(&tree), first);
        prop_assert!(outcome.is_valid());
    }

    /// The same holds for calls, calls of calls and exponent literals.
    #[test]
    fn rewrite_is_idempotent_on_answers(tree in answer(), strict in any::<bool>()) {
        let options = RewriteOptions { strict_syntax: strict, ..RewriteOptions::default() };
        let mut tree = tree;
        rewrite(&mut tree, &mut Outcome::new(), false, &options).unwrap();
        prop_assert!(tree.validate().is_ok());
        let first = render(&tree);

        let mut outcome = Outcome::new();
        let stats = rewrite(&mut tree, &mut outcome, false, &options).unwrap();
        prop_assert_eq!(stats.rewrites, 0);
        prop_assert_eq!(render(&tree), first);
        prop_assert!(outcome.is_valid());
    }

    /// Safe variable names are never touched as values.
    #[test]
    fn safe_variables_are_untouched(name in mixed_name()) {
        let options = RewriteOptions::default().with_safe_variables([name.clone()]);
        let mut tree = ident(&name);
        let mut outcome = Outcome::new();
        let stats = rewrite(&mut tree, &mut outcome, false, &options).unwrap();
        prop_assert_eq!(stats.rewrites, 0);
        prop_assert_eq!(render(&tree), name);
        prop_assert!(outcome.is_valid());
        prop_assert!(outcome.notes().is_empty());
    }

    /// Validity never comes back once cleared, and permitted rewrites never
    /// clear it.
    #[test]
    fn validity_is_monotone(name in mixed_name(), permit in any::<bool>()) {
        let options = RewriteOptions::default();

        let mut cleared = Outcome::new();
        cleared.invalidate();
        rewrite(&mut ident(&name), &mut cleared, permit, &options).unwrap();
        prop_assert!(!cleared.is_valid());

        let mut fresh = Outcome::new();
        let stats = rewrite(&mut ident(&name), &mut fresh, permit, &options).unwrap();
        prop_assert_eq!(fresh.is_valid(), permit || stats.rewrites == 0);
        prop_assert_eq!(fresh.notes().len(), stats.rewrites);
    }

    /// Under strict syntax a name of k segments becomes exactly k-1 products.
    #[test]
    fn strict_split_yields_segment_products(name in mixed_name()) {
        let segments = split_digit_runs(&name);
        let mut tree = ident(&name);
        let mut outcome = Outcome::new();
        let stats = rewrite(&mut tree, &mut outcome, false, &RewriteOptions::strict()).unwrap();

        prop_assert_eq!(stats.rewrites, usize::from(segments.len() > 1));
        prop_assert_eq!(missing_stars(&tree), segments.len() - 1);
        prop_assert_eq!(render(&tree), segments.join("*"));
    }
}
