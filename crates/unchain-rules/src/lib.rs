//! Unchain Rules
//!
//! Built-in rules and the rule engine for the `unchain` linter.

pub mod builtin;
pub mod engine;
pub mod rules;

pub use builtin::BuiltinRules;
pub use builtin::chained_assignments::{
    NO_CHAINED_ASSIGNMENTS, TextEdit, is_chain_link, split_chained_assignment,
};
pub use builtin::parse_errors::PARSE_ERROR;
pub use engine::RuleEngine;
pub use rules::{Rule, RuleCategory, RuleMetadata};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
