//! Error types for token-set operations and attribute binding.

use thiserror::Error;

/// Errors that can occur while mutating a token set or constructing an
/// attribute binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenSetError {
    /// A candidate token was empty or contained whitespace.
    /// Raised before any mutation takes place in the call that supplied it.
    #[error("invalid token {token:?}: {reason}")]
    InvalidToken {
        token: String,
        reason: &'static str,
    },

    /// A named attribute does not exist on the live element given at
    /// binding construction.
    #[error("attribute {attr:?} not found on element {element:?}")]
    AttributeNotFound { attr: String, element: String },

    /// An explicit attribute handle does not belong to the element given
    /// at binding construction.
    #[error("attribute {attr:?} is not owned by element {element:?}")]
    OwnershipMismatch { attr: String, element: String },

    /// Neither the element nor the attribute argument had a usable shape
    /// (e.g. an empty name).
    #[error("invalid binding target: {0}")]
    InvalidBindingTarget(String),
}

/// Convenience alias used throughout tokenset-core.
pub type Result<T> = std::result::Result<T, TokenSetError>;
