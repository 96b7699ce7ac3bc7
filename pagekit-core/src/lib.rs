//! Framework-agnostic paginator state.
//!
//! A [`Paginator`] owns a non-empty [`PageCollection`] and a clamped
//! [`PageCursor`]. Display surfaces turn the current page into their own
//! output through [`PageRenderer`].

/// Owned page storage and jump targets.
pub mod collection;
/// Clamped index arithmetic.
pub mod cursor;
/// Argument errors.
pub mod error;
/// Session options shared by display surfaces.
pub mod options;
/// Paginator facade over collection and cursor.
pub mod paginator;
/// Rendering hook and page position.
pub mod render;

pub use collection::{JumpTarget, PageCollection};
pub use cursor::{PageChange, PageCursor};
pub use error::PaginatorError;
pub use options::{AfterAction, DEFAULT_TIMEOUT_SECS, PaginatorOptions, parse_timeout_secs};
pub use paginator::{Navigation, Paginator};
pub use render::{PageRenderer, Position};
