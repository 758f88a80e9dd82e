//! Result type alias for unchain operations

use crate::error::UnchainError;

pub type Result<T> = std::result::Result<T, UnchainError>;
