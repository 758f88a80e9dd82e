//! Diagnostics produced by lint rules
//!
//! - Precise positions (1-based line/column plus byte offsets)
//! - Code suggestions with applicability levels (safe vs unsafe)
//! - Offset to line/column conversion through [`SourceMap`]

mod source_map;
mod types;

pub use source_map::SourceMap;
pub use types::*;
