use crate::error::RewriteError;
use crate::options::RewriteOptions;
use cas_ast::{NodeId, Tree};

/// A rule's proposed edit: put `replacement` where `target` now sits.
///
/// `target` is usually the visited node, but a rule looking at a callee
/// name targets the enclosing call so the arguments move with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub target: NodeId,
    /// Freshly built, not yet attached
    pub replacement: NodeId,
    /// Human-readable description of the transformation
    pub description: String,
}

impl Rewrite {
    pub fn new(target: NodeId, replacement: NodeId) -> Self {
        Self {
            target,
            replacement,
            description: String::new(),
        }
    }

    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One ambiguity detector.
///
/// `apply` looks at a single node. When the pattern does not match it must
/// leave the tree untouched and return `Ok(None)`. When it matches it may
/// allocate the replacement subtree (reusing existing children), but the
/// swap itself is done by the driver.
pub trait StarRule {
    fn name(&self) -> &str;

    fn apply(
        &self,
        tree: &mut Tree,
        node: NodeId,
        options: &RewriteOptions,
    ) -> Result<Option<Rewrite>, RewriteError>;
}
