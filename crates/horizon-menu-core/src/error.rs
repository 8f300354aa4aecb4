//! Error types for Horizon Menu core.

use crate::dom::ElementId;

/// Result type alias for DOM operations.
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Errors raised by the DOM contract and the selector engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The element handle does not belong to the document (or was never created).
    #[error("Element {0:?} does not exist in this document")]
    UnknownElement(ElementId),

    /// Selector parsing error.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Attempted to build a cycle or attach an element under itself.
    #[error("Cannot append {child:?} to {parent:?}: the parent is inside the child")]
    InvalidHierarchy { parent: ElementId, child: ElementId },
}

impl DomError {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid or has already fired or been stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}
