//! Lazy page and entry iteration.
//!
//! [`Pages`] yields the starting page, then fetches one following page per
//! call to `next`. Nothing is fetched ahead: dropping the iterator leaves no
//! outstanding work. [`Entries`] flattens the pages into records.

use std::iter::FusedIterator;

use crate::attributes::Record;
use crate::collection::Collection;
use crate::error::Result;

enum State {
    Start(Collection),
    After(Collection),
    Done,
}

/// Iterator over page snapshots, created by
/// [`Collection::each_page`](crate::Collection::each_page).
///
/// Ends after the last page or after yielding an error.
pub struct Pages {
    state: State,
}

impl Pages {
    pub(crate) fn new(start: Collection) -> Self {
        Pages {
            state: State::Start(start),
        }
    }
}

impl Iterator for Pages {
    type Item = Result<Collection>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::Start(page) => {
                self.state = State::After(page.clone());
                Some(Ok(page))
            }
            State::After(previous) => match previous.next_page() {
                Ok(Some(page)) => {
                    self.state = State::After(page.clone());
                    Some(Ok(page))
                }
                Ok(None) => None,
                Err(err) => Some(Err(err)),
            },
            State::Done => None,
        }
    }
}

impl FusedIterator for Pages {}

/// Iterator over the records of every page, created by
/// [`Collection::each_entry`](crate::Collection::each_entry).
///
/// Order is page by page, then the server's order within a page.
pub struct Entries {
    pages: Pages,
    current: std::vec::IntoIter<Record>,
}

impl Entries {
    pub(crate) fn new(pages: Pages) -> Self {
        Entries {
            pages,
            current: Vec::new().into_iter(),
        }
    }
}

impl Iterator for Entries {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.current.next() {
                return Some(Ok(record));
            }
            match self.pages.next()? {
                Ok(page) => self.current = page.into_records().into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl FusedIterator for Entries {}
