//! Type aliases for JavaScript CST nodes
//!
//! Rowan's generic tree types, parameterized with `JsLanguage`.

use super::JsLanguage;

/// A node in the JavaScript concrete syntax tree
///
/// Nodes give access to parent and child nodes, the covered source text, and
/// their syntax kind. Cloning is cheap.
pub type JsSyntaxNode = rowan::SyntaxNode<JsLanguage>;

/// A token (leaf) in the JavaScript concrete syntax tree
pub type JsSyntaxToken = rowan::SyntaxToken<JsLanguage>;

/// Either a node or a token
pub type JsSyntaxElement = rowan::SyntaxElement<JsLanguage>;

// Re-export common rowan types for convenience
pub use rowan::{Direction, NodeOrToken, TextRange, TextSize, WalkEvent};
