//! Error types for veiltrie

use thiserror::Error;

/// Result type alias for veiltrie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in veiltrie operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid modulus: {0}")]
    InvalidModulus(String),

    #[error("name has no path components: {0:?}")]
    EmptyName(String),

    #[error("start depth {depth} is not reachable for a name with {segments} segments")]
    InvalidDepth { depth: usize, segments: usize },
}
