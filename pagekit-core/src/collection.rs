//! Owned page storage, either plain or keyed by name.

use std::collections::HashSet;

use crate::error::PaginatorError;

/// Where a jump should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpTarget {
    Index(usize),
    Key(String),
}

impl From<usize> for JumpTarget {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for JumpTarget {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for JumpTarget {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// Ordered, non-empty pages with optional unique keys.
///
/// Pages are moved in on construction, so the caller's original
/// collection is never shared with the paginator.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCollection<P> {
    pages: Vec<P>,
    keys: Option<Vec<String>>,
}

impl<P> PageCollection<P> {
    /// Build an index-addressed collection.
    pub fn new(pages: impl IntoIterator<Item = P>) -> Result<Self, PaginatorError> {
        let pages: Vec<P> = pages.into_iter().collect();
        if pages.is_empty() {
            return Err(PaginatorError::EmptyCollection);
        }

        Ok(Self { pages, keys: None })
    }

    /// Build a collection addressed by key as well as by index.
    ///
    /// Insertion order is the navigation order.
    pub fn keyed<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, P)>,
    ) -> Result<Self, PaginatorError> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut pages = Vec::new();

        for (key, page) in entries {
            let key = key.into();
            if !seen.insert(key.clone()) {
                return Err(PaginatorError::DuplicateKey(key));
            }
            keys.push(key);
            pages.push(page);
        }

        if pages.is_empty() {
            return Err(PaginatorError::EmptyCollection);
        }

        Ok(Self {
            pages,
            keys: Some(keys),
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.keys.as_ref()?.get(index).map(String::as_str)
    }

    /// Resolve a jump target to an index that exists in this collection.
    pub fn resolve(&self, target: &JumpTarget) -> Result<usize, PaginatorError> {
        match target {
            JumpTarget::Index(index) if *index < self.len() => Ok(*index),
            JumpTarget::Index(index) => Err(PaginatorError::IndexOutOfRange {
                index: *index,
                len: self.len(),
            }),
            JumpTarget::Key(key) => self
                .keys
                .as_ref()
                .and_then(|keys| keys.iter().position(|candidate| candidate == key))
                .ok_or_else(|| PaginatorError::UnknownKey(key.clone())),
        }
    }

    /// Group consecutive pages into chunks of `per_page`.
    ///
    /// Keys are dropped; a chunk has no single name.
    pub fn chunked(self, per_page: usize) -> Result<PageCollection<Vec<P>>, PaginatorError> {
        let len = self.len();
        if per_page == 0 || per_page > len {
            return Err(PaginatorError::InvalidPerPage { per_page, len });
        }

        let mut chunks = Vec::with_capacity(len.div_ceil(per_page));
        let mut pages = self.pages.into_iter().peekable();
        while pages.peek().is_some() {
            chunks.push(pages.by_ref().take(per_page).collect());
        }

        PageCollection::new(chunks)
    }
}
