pub mod display;
pub mod error;
pub mod expression;
pub mod span;
pub mod traversal;

pub use display::{DisplayTree, HighlightColor, StarHighlight};
pub use error::AstError;
pub use expression::{Node, NodeId, OpPosition, Operator, Tree};
pub use span::Span;
