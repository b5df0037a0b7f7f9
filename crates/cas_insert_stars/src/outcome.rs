//! Validity flag, answer notes and diagnostics gathered while normalising
//! one answer.

use crate::diagnostics::Diagnostic;
use std::fmt;

/// Classification tags attached to an answer.
///
/// The string forms are the tags graders match on, so they stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnswerNote {
    /// A multiplication had to be inserted
    MissingStars,
    /// The preparser found a product written with whitespace only
    Spaces,
    /// A digit run was too long to become an integer
    IntegerOverflow,
    /// Any other tag from upstream stages
    Other(String),
}

impl AnswerNote {
    pub fn as_str(&self) -> &str {
        match self {
            AnswerNote::MissingStars => "missing_stars",
            AnswerNote::Spaces => "spaces",
            AnswerNote::IntegerOverflow => "integer_overflow",
            AnswerNote::Other(tag) => tag,
        }
    }
}

impl From<&str> for AnswerNote {
    fn from(tag: &str) -> Self {
        match tag {
            "missing_stars" => AnswerNote::MissingStars,
            "spaces" => AnswerNote::Spaces,
            "integer_overflow" => AnswerNote::IntegerOverflow,
            other => AnswerNote::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AnswerNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the pass reports back besides the rewritten tree.
///
/// Validity starts out true and can only be cleared; notes and errors are
/// append-only and may repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    valid: bool,
    notes: Vec<AnswerNote>,
    errors: Vec<Diagnostic>,
}

impl Default for Outcome {
    fn default() -> Self {
        Self::new()
    }
}

impl Outcome {
    pub fn new() -> Self {
        Self {
            valid: true,
            notes: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn notes(&self) -> &[AnswerNote] {
        &self.notes
    }

    pub fn push_note(&mut self, note: AnswerNote) {
        self.notes.push(note);
    }

    pub fn has_note(&self, note: &AnswerNote) -> bool {
        self.notes.contains(note)
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn push_error(&mut self, error: Diagnostic) {
        self.errors.push(error);
    }
}
