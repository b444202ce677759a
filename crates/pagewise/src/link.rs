//! Page links and cursor state.
//!
//! Responses carry `next_page` / `previous_page` locations. They are kept as
//! opaque [`PageLink`] tokens: the location string round-trips unchanged into
//! the next request. The only thing ever read out of a location is the
//! embedded filter query of a search continuation.

use serde_json::Value;
use url::form_urlencoded;

use crate::attributes::Attributes;

/// Request parameter addressing a page by its location.
pub const URL_PARAM: &str = "url";
/// Request parameter marking a reconstituted search request.
pub const FILTERED_PARAM: &str = "filtered";
/// Parameter holding a search's free-text query.
pub const QUERY_PARAM: &str = "query";
/// Page index parameter (1-based).
pub const PAGE_PARAM: &str = "page";
/// Page size parameter.
pub const PER_PAGE_PARAM: &str = "per_page";

/// Response field carrying the total number of records.
pub const COUNT_FIELD: &str = "count";
/// Response field carrying the next page location.
pub const NEXT_PAGE_FIELD: &str = "next_page";
/// Response field carrying the previous page location.
pub const PREVIOUS_PAGE_FIELD: &str = "previous_page";

/// Location of a neighbouring page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageLink {
    /// Continuation of a plain listing.
    Listing(String),
    /// Continuation of a search; the location embeds the query.
    Search(String),
}

impl PageLink {
    /// Wraps a location from a response, tagged by the mode that produced it.
    pub fn new(location: impl Into<String>, search: bool) -> Self {
        let location = location.into();
        if search {
            PageLink::Search(location)
        } else {
            PageLink::Listing(location)
        }
    }

    /// The location exactly as received.
    pub fn location(&self) -> &str {
        match self {
            PageLink::Listing(loc) | PageLink::Search(loc) => loc,
        }
    }

    /// Returns `true` for search continuations.
    pub fn is_search(&self) -> bool {
        matches!(self, PageLink::Search(_))
    }

    /// The free-text query embedded in a search continuation.
    ///
    /// Always `None` for listing continuations.
    pub fn filter_query(&self) -> Option<String> {
        match self {
            PageLink::Search(loc) => query_pairs(loc)
                .find(|(k, _)| k == QUERY_PARAM)
                .map(|(_, v)| v),
            PageLink::Listing(_) => None,
        }
    }

    /// The location's parameters other than the query, as strings.
    pub fn search_params(&self) -> Attributes {
        query_pairs(self.location())
            .filter(|(k, _)| k != QUERY_PARAM)
            .collect()
    }
}

fn query_pairs(location: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let query = location.split_once('?').map(|(_, q)| q).unwrap_or("");
    let query = query.split_once('#').map(|(q, _)| q).unwrap_or(query);
    form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned()))
}

/// Pagination state of the current page.
///
/// Replaced on every page load. `next` is `None` exactly on the last page; a
/// present link does not guarantee the following fetch succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCursor {
    /// Total records across all pages, when reported.
    pub count: Option<u64>,
    /// Location of the next page.
    pub next: Option<PageLink>,
    /// Location of the previous page.
    pub previous: Option<PageLink>,
}

impl PageCursor {
    /// Reads `count`, `next_page` and `previous_page` from a response body.
    ///
    /// Absent, `null` and empty links all mean "no such page".
    pub fn from_body(body: &Attributes, search: bool) -> Self {
        let link = |field: &str| match body.get(field) {
            Some(Value::String(loc)) if !loc.is_empty() => Some(PageLink::new(loc.as_str(), search)),
            _ => None,
        };

        PageCursor {
            count: body.get(COUNT_FIELD).and_then(Value::as_u64),
            next: link(NEXT_PAGE_FIELD),
            previous: link(PREVIOUS_PAGE_FIELD),
        }
    }

    /// Returns `true` if a next page is linked.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` if a previous page is linked.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}
