//! Makes the multiplications students leave out explicit.
//!
//! Input is an already parsed [`cas_ast::Tree`]. Every recognised ambiguity
//! (`2x`-style names, `f(x)(y)`, `1e-3` read as a literal, ...) is rewritten
//! into an explicit product, noted on the [`Outcome`], and optionally counted
//! as an error depending on whether implicit multiplication is permitted.

#[macro_use]
pub mod macros;

pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod logic;
pub mod names;
pub mod options;
pub mod outcome;
pub mod rule;
pub mod rules;

pub use diagnostics::{extract_diagnostics, render_marked, Diagnostic};
pub use driver::{rewrite, RewriteStats, Rewriter};
pub use error::{ConfigError, RewriteError};
pub use logic::{Hook, Hooks, InsertStars, Preparser};
pub use options::{InsertStarsConfig, RewriteOptions};
pub use outcome::{AnswerNote, Outcome};
pub use rule::{Rewrite, StarRule};
