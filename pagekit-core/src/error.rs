//! Errors raised while building or navigating a paginator.

use thiserror::Error;

/// Argument errors surfaced synchronously by paginator operations.
///
/// Nothing here is transient; callers should never retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginatorError {
    #[error("no pages provided")]
    EmptyCollection,
    #[error("page index {index} is out of range for {len} page(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no page is registered under key `{0}`")]
    UnknownKey(String),
    #[error("page key `{0}` is used more than once")]
    DuplicateKey(String),
    #[error("per_page must be between 1 and {len}, got {per_page}")]
    InvalidPerPage { per_page: usize, len: usize },
}

impl PaginatorError {
    /// Every variant describes a bad argument, including an empty page list.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptyCollection
                | Self::IndexOutOfRange { .. }
                | Self::UnknownKey(_)
                | Self::DuplicateKey(_)
                | Self::InvalidPerPage { .. }
        )
    }
}
