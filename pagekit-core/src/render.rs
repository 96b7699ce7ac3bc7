//! Rendering hook that turns the current page into a display unit.

use std::fmt;

/// Where the rendered page sits in its paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based page index.
    pub index: usize,
    /// Total page count, always at least one.
    pub total: usize,
}

impl Position {
    /// One-based page number as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn page_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.number(), self.total)
    }
}

/// Converts a page into whatever a display surface sends.
///
/// Implemented once per presentation (message content, embeds, component
/// trees). Closures taking `(&P, Position)` implement it as well.
pub trait PageRenderer<P> {
    type Output;

    fn render(&self, page: &P, position: Position) -> Self::Output;
}

impl<P, O, F> PageRenderer<P> for F
where
    F: Fn(&P, Position) -> O,
{
    type Output = O;

    fn render(&self, page: &P, position: Position) -> O {
        self(page, position)
    }
}
