//! Concrete Syntax Tree (CST) for JavaScript
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves all source information including whitespace, comments,
//! and formatting, which is what allows autofixes to splice text without
//! disturbing anything around them.
//!
//! ## Architecture
//!
//! - **Green Tree**: immutable, position-independent storage of tokens and
//!   trivia, cheap to clone
//! - **Red Tree**: a view with parent pointers created on demand for traversal
//!
//! `parse_program(source).root.text() == source` holds for every input,
//! including inputs with syntax errors.
//!
//! ## Example
//!
//! ```rust,ignore
//! use unchain_core::cst::{SourceCode, JsSyntaxKind};
//!
//! let source = SourceCode::parse("app.js", "var a = b = c; // chained");
//! for node in source.root().descendants() {
//!     if node.kind() == JsSyntaxKind::AssignExpr {
//!         println!("assignment: {}", source.text_of(&node));
//!     }
//! }
//! ```

mod builder;
mod language;
mod lexer;
mod nodes;
mod parser;
mod source;
mod syntax_kind;

pub mod ast;

pub use builder::CstBuilder;
pub use language::JsLanguage;
pub use lexer::{CstLexResult, CstSpan, CstToken, LexerError, lex_with_trivia};
pub use nodes::*;
pub use parser::{Parse, ParseError, parse_program};
pub use source::SourceCode;
pub use syntax_kind::JsSyntaxKind;

#[cfg(test)]
mod tests;
