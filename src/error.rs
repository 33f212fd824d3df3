use thiserror::Error;

use crate::services::ServiceError;

/// Failures that can cross the editor's public boundary.
///
/// Expected outcomes (an empty lasso, a too-small link rectangle, an
/// undo with nothing to undo) are not errors; those operations
/// resolve silently. Only external-collaborator failures, resource
/// failures, and genuinely corrupted state surface here.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no page at index {0}")]
    PageNotFound(usize),

    #[error("no element with id {0} on the active page")]
    ElementNotFound(u64),

    #[error("corrupted element data: {0}")]
    CorruptedElement(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("document read/write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
