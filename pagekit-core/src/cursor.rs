//! Clamped page cursor.
//!
//! The cursor only knows a length and a position. It never wraps: moving
//! past either end leaves the position where it is.

use crate::error::PaginatorError;

/// Position change produced by a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub before: usize,
    pub after: usize,
}

impl PageChange {
    /// Whether the step actually moved the cursor.
    pub fn moved(self) -> bool {
        self.before != self.after
    }
}

/// Current index over a non-empty run of pages.
///
/// Invariant: `index < len` and `len > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    index: usize,
    len: usize,
}

impl PageCursor {
    /// Create a cursor at `start` over `len` pages.
    pub fn new(len: usize, start: usize) -> Result<Self, PaginatorError> {
        if len == 0 {
            return Err(PaginatorError::EmptyCollection);
        }

        if start >= len {
            return Err(PaginatorError::IndexOutOfRange { index: start, len });
        }

        Ok(Self { index: start, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; an empty cursor cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.len
    }

    pub fn next(&mut self) -> PageChange {
        self.move_to(self.index.saturating_add(1).min(self.last_index()))
    }

    pub fn previous(&mut self) -> PageChange {
        self.move_to(self.index.saturating_sub(1))
    }

    pub fn first(&mut self) -> PageChange {
        self.move_to(0)
    }

    pub fn last(&mut self) -> PageChange {
        self.move_to(self.last_index())
    }

    /// Jump to an exact index; unlike the stepping methods this rejects
    /// out-of-range targets instead of clamping them.
    pub fn jump_to(&mut self, index: usize) -> Result<PageChange, PaginatorError> {
        if index >= self.len {
            return Err(PaginatorError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        Ok(self.move_to(index))
    }

    /// Change the length, clamping the index into the new bounds.
    pub fn resize(&mut self, len: usize) -> Result<PageChange, PaginatorError> {
        if len == 0 {
            return Err(PaginatorError::EmptyCollection);
        }

        self.len = len;
        Ok(self.move_to(self.index.min(len - 1)))
    }

    fn last_index(&self) -> usize {
        self.len - 1
    }

    fn move_to(&mut self, index: usize) -> PageChange {
        let before = self.index;
        self.index = index;
        PageChange {
            before,
            after: index,
        }
    }
}
