#![allow(dead_code)]

use cas_ast::{DisplayTree, NodeId, Tree};
use cas_insert_stars::{rewrite, Outcome, RewriteOptions, RewriteStats};

/// Tree whose body is whatever `build` returns.
pub fn tree_with(build: impl FnOnce(&mut Tree) -> NodeId) -> Tree {
    let mut tree = Tree::new();
    let body = build(&mut tree);
    tree.set_body(body).unwrap();
    tree
}

pub fn ident(name: &str) -> Tree {
    tree_with(|t| t.ident(name))
}

/// `name(arg)` with a single identifier argument.
pub fn call(name: &str, arg: &str) -> Tree {
    tree_with(|t| {
        let callee = t.ident(name);
        let arg = t.ident(arg);
        t.call(callee, vec![arg])
    })
}

/// A float literal the parser kept as raw text.
pub fn raw_float(raw: &str) -> Tree {
    tree_with(|t| t.float(0.0, Some(raw.to_string())))
}

pub fn render(tree: &Tree) -> String {
    DisplayTree::new(tree, tree.root()).to_string()
}

/// Rewrite with implicit multiplication forbidden.
pub fn normalise(tree: &mut Tree, options: &RewriteOptions) -> (RewriteStats, Outcome) {
    let mut outcome = Outcome::new();
    let stats = rewrite(tree, &mut outcome, false, options).unwrap();
    tree.validate().unwrap();
    (stats, outcome)
}

/// Render after a lenient rewrite.
pub fn lenient(mut tree: Tree) -> String {
    normalise(&mut tree, &RewriteOptions::default());
    render(&tree)
}

/// Render after a strict rewrite.
pub fn strict(mut tree: Tree) -> String {
    normalise(&mut tree, &RewriteOptions::strict());
    render(&tree)
}
