use std::slice::Chunks;

use crate::error::{Result, SearchError};

/// Fixed-size pages over a borrowed sequence; the last page may be short.
#[derive(Debug)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<T> Clone for Paginator<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Paginator<'_, T> {}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SearchError::invalid_argument("page size must be positive"));
        }
        Ok(Self { items, page_size })
    }

    /// Pages in order. Can be called any number of times.
    pub fn iter(&self) -> Chunks<'a, T> { self.items.chunks(self.page_size) }

    pub fn page(&self, n: usize) -> Option<&'a [T]> { self.iter().nth(n) }

    pub fn page_size(&self) -> usize { self.page_size }

    pub fn len(&self) -> usize { self.items.len().div_ceil(self.page_size) }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = Chunks<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = Chunks<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}
