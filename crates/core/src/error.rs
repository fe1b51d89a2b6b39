//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures. The short codes
/// carried by the transition/product-line variants are stable: the boundary
/// layer keys its user-facing message catalog off them, so they must never
/// be reworded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An attempted status transition violates the invoice state machine.
    #[error("invalid status transition: {0}")]
    InvalidStatusTransition(String),

    /// A product line failed its construction invariant, or an invoice
    /// failed to send because of its line collection.
    #[error("invalid product line: {0}")]
    InvalidProductLine(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_transition(code: impl Into<String>) -> Self {
        Self::InvalidStatusTransition(code.into())
    }

    pub fn invalid_product_line(reason: impl Into<String>) -> Self {
        Self::InvalidProductLine(reason.into())
    }

    pub fn invalid_id(reason: impl Into<String>) -> Self {
        Self::InvalidId(reason.into())
    }
}
