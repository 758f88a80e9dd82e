//! Error types for unchain

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop unchain from linting or fixing a file
///
/// Syntax errors are not here: the parser recovers and they are reported as
/// diagnostics instead.
#[derive(Debug, Error)]
pub enum UnchainError {
    /// The syntax tree does not have the shape a rule relies on, e.g. an
    /// assignment with no enclosing statement or no `=` operator token
    #[error("Malformed syntax tree: {message}")]
    MalformedTree { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Unknown rule or a rule that failed on a file
    #[error("Rule error in '{rule_id}': {message}")]
    RuleError { rule_id: String, message: String },

    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fix edits that overlap or fall outside the text
    #[error("Autofix error: {message}")]
    AutofixError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl UnchainError {
    pub fn malformed_tree(message: impl Into<String>) -> Self {
        Self::MalformedTree {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn rule_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleError {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// IO error tagged with the path it happened on
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn autofix_error(message: impl Into<String>) -> Self {
        Self::AutofixError {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for UnchainError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
