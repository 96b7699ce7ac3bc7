//! Paginator: an owned page collection plus its cursor.

use crate::collection::{JumpTarget, PageCollection};
use crate::cursor::{PageChange, PageCursor};
use crate::error::PaginatorError;
use crate::render::{PageRenderer, Position};

/// A single navigation request, as produced by a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    First,
    Previous,
    Next,
    Last,
    Jump(JumpTarget),
}

/// Pages and the position currently on display.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<P> {
    pages: PageCollection<P>,
    cursor: PageCursor,
}

impl<P> Paginator<P> {
    /// Start on the first of `pages`.
    pub fn new(pages: impl IntoIterator<Item = P>) -> Result<Self, PaginatorError> {
        Self::from_collection(PageCollection::new(pages)?, 0)
    }

    /// Start on `start` (zero-based) of `pages`.
    pub fn with_start(
        pages: impl IntoIterator<Item = P>,
        start: usize,
    ) -> Result<Self, PaginatorError> {
        Self::from_collection(PageCollection::new(pages)?, start)
    }

    /// Start on the first of a keyed set of pages.
    pub fn keyed<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, P)>,
    ) -> Result<Self, PaginatorError> {
        Self::from_collection(PageCollection::keyed(entries)?, 0)
    }

    pub fn from_collection(pages: PageCollection<P>, start: usize) -> Result<Self, PaginatorError> {
        let cursor = PageCursor::new(pages.len(), start)?;
        Ok(Self { pages, cursor })
    }

    /// Show `per_page` consecutive pages at a time.
    pub fn chunked(
        pages: impl IntoIterator<Item = P>,
        per_page: usize,
    ) -> Result<Paginator<Vec<P>>, PaginatorError> {
        let chunks = PageCollection::new(pages)?.chunked(per_page)?;
        Paginator::from_collection(chunks, 0)
    }

    pub fn next(&mut self) -> PageChange {
        self.cursor.next()
    }

    pub fn previous(&mut self) -> PageChange {
        self.cursor.previous()
    }

    pub fn first(&mut self) -> PageChange {
        self.cursor.first()
    }

    pub fn last(&mut self) -> PageChange {
        self.cursor.last()
    }

    /// Move straight to an index or key; missing targets leave the
    /// position untouched.
    pub fn jump_to(&mut self, target: impl Into<JumpTarget>) -> Result<PageChange, PaginatorError> {
        let index = self.pages.resolve(&target.into())?;
        self.cursor.jump_to(index)
    }

    pub fn navigate(&mut self, navigation: Navigation) -> Result<PageChange, PaginatorError> {
        match navigation {
            Navigation::First => Ok(self.first()),
            Navigation::Previous => Ok(self.previous()),
            Navigation::Next => Ok(self.next()),
            Navigation::Last => Ok(self.last()),
            Navigation::Jump(target) => self.jump_to(target),
        }
    }

    /// Replace the pages, keeping the current index when it still exists
    /// and clamping it to the new last page otherwise.
    pub fn set_pages(
        &mut self,
        pages: impl IntoIterator<Item = P>,
    ) -> Result<PageChange, PaginatorError> {
        self.set_collection(PageCollection::new(pages)?)
    }

    pub fn set_collection(
        &mut self,
        pages: PageCollection<P>,
    ) -> Result<PageChange, PaginatorError> {
        let change = self.cursor.resize(pages.len())?;
        self.pages = pages;
        Ok(change)
    }

    pub fn current(&self) -> &P {
        // The cursor is always resized together with the collection.
        &self.pages.pages()[self.cursor.index()]
    }

    pub fn current_key(&self) -> Option<&str> {
        self.pages.key_at(self.cursor.index())
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Always `false`; see [`PageCursor::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.cursor.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.cursor.is_last()
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.cursor.index(),
            total: self.cursor.len(),
        }
    }

    pub fn page_string(&self) -> String {
        self.position().page_string()
    }

    pub fn collection(&self) -> &PageCollection<P> {
        &self.pages
    }

    pub fn render<R: PageRenderer<P> + ?Sized>(&self, renderer: &R) -> R::Output {
        renderer.render(self.current(), self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<char> {
        vec!['A', 'B', 'C', 'D', 'E']
    }

    #[test]
    fn every_valid_start_shows_its_page() {
        for len in 1..=6 {
            let pages: Vec<usize> = (0..len).collect();
            for start in 0..len {
                let paginator = Paginator::with_start(pages.clone(), start).unwrap();
                assert_eq!(*paginator.current(), start);
            }
        }
    }

    #[test]
    fn empty_construction_is_an_invalid_argument() {
        let err = Paginator::<char>::new(Vec::new()).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Paginator::with_start(letters(), 5).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn clamped_walk_over_five_pages() {
        let mut paginator = Paginator::with_start(letters(), 2).unwrap();
        assert_eq!(*paginator.current(), 'C');

        paginator.next();
        assert_eq!((paginator.index(), *paginator.current()), (3, 'D'));
        paginator.next();
        assert_eq!((paginator.index(), *paginator.current()), (4, 'E'));
        assert!(!paginator.next().moved());
        assert_eq!((paginator.index(), *paginator.current()), (4, 'E'));

        for _ in 0..5 {
            paginator.previous();
        }
        assert_eq!((paginator.index(), *paginator.current()), (0, 'A'));
    }

    #[test]
    fn first_then_last_from_anywhere() {
        let mut paginator = Paginator::with_start(letters(), 3).unwrap();
        paginator.first();
        assert_eq!(paginator.index(), 0);
        paginator.last();
        assert_eq!(paginator.index(), 4);
    }

    #[test]
    fn set_pages_clamps_when_shrinking() {
        let mut paginator = Paginator::with_start(letters(), 4).unwrap();
        let change = paginator.set_pages(['x', 'y']).unwrap();
        assert_eq!(change, PageChange { before: 4, after: 1 });
        assert_eq!(*paginator.current(), 'y');
    }

    #[test]
    fn set_pages_keeps_position_when_it_still_exists() {
        let mut paginator = Paginator::with_start(letters(), 1).unwrap();
        paginator.set_pages("vwxyz".chars()).unwrap();
        assert_eq!(*paginator.current(), 'w');
    }

    #[test]
    fn set_pages_rejects_empty_and_keeps_old_pages() {
        let mut paginator = Paginator::with_start(letters(), 1).unwrap();
        assert_eq!(
            paginator.set_pages(Vec::new()),
            Err(PaginatorError::EmptyCollection)
        );
        assert_eq!(*paginator.current(), 'B');
        assert_eq!(paginator.len(), 5);
    }

    #[test]
    fn jumps_by_key() {
        let pages = [("rules", "Be nice"), ("faq", "Ask away"), ("links", "See pins")];
        let mut paginator = Paginator::keyed(pages).unwrap();
        paginator.jump_to("faq").unwrap();
        assert_eq!(*paginator.current(), "Ask away");
        assert_eq!(paginator.current_key(), Some("faq"));

        let err = paginator.jump_to("missing").unwrap_err();
        assert_eq!(err, PaginatorError::UnknownKey("missing".to_owned()));
        assert_eq!(paginator.current_key(), Some("faq"));
    }

    #[test]
    fn navigate_dispatches_every_request() {
        let mut paginator = Paginator::new(letters()).unwrap();
        paginator.navigate(Navigation::Last).unwrap();
        assert_eq!(paginator.index(), 4);
        paginator.navigate(Navigation::Previous).unwrap();
        assert_eq!(paginator.index(), 3);
        paginator.navigate(Navigation::Jump(JumpTarget::Index(1))).unwrap();
        assert_eq!(paginator.index(), 1);
        paginator.navigate(Navigation::Next).unwrap();
        assert_eq!(paginator.index(), 2);
        paginator.navigate(Navigation::First).unwrap();
        assert_eq!(paginator.index(), 0);
        assert!(paginator.navigate(Navigation::Jump(JumpTarget::Index(9))).is_err());
    }

    #[test]
    fn chunked_paginator_walks_chunks() {
        let mut paginator = Paginator::chunked(1..=5, 2).unwrap();
        assert_eq!(paginator.len(), 3);
        assert_eq!(paginator.current(), &vec![1, 2]);
        paginator.last();
        assert_eq!(paginator.current(), &vec![5]);
        assert_eq!(paginator.page_string(), "Page 3 of 3");
    }

    #[test]
    fn render_passes_page_and_position() {
        let mut paginator = Paginator::new(["one", "two"]).unwrap();
        paginator.next();
        let text = paginator.render(&|page: &&str, position: Position| {
            format!("{page}\n{position}")
        });
        assert_eq!(text, "two\nPage 2 of 2");
    }
}
