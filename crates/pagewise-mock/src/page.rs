//! Page slicing for mock listing and search responses.
//!
//! The requested page comes either from `page` / `per_page` parameters or,
//! when following a link, from the query string of the `url` parameter. The
//! response carries the slice under its root plus `count`, `next_page` and
//! `previous_page`, with links built as
//! `{base_url}{path}?page=..&per_page=..` followed by any extra link
//! parameters.

use pagewise::{
    Attributes, TransportError, COUNT_FIELD, NEXT_PAGE_FIELD, PAGE_PARAM, PER_PAGE_PARAM,
    PREVIOUS_PAGE_FIELD, URL_PARAM,
};
use serde_json::Value;
use url::{form_urlencoded, Url};

/// Page size used when neither the request nor the config sets one.
pub const DEFAULT_PER_PAGE: usize = 100;

/// Where a paged response lives and how its links are built.
#[derive(Debug, Clone)]
pub struct PageLayout<'a> {
    /// Response field wrapping the slice.
    pub root: &'a str,
    /// Service base url.
    pub base_url: &'a str,
    /// Path appended to the base url, e.g. `/search.json`.
    pub path: String,
    /// Page size when the request does not set one.
    pub default_per_page: usize,
    /// Parameters appended to every link, e.g. the search query.
    pub link_params: Vec<(String, String)>,
}

impl<'a> PageLayout<'a> {
    /// A layout for `root` served under `/{root}.json`.
    pub fn new(root: &'a str, base_url: &'a str) -> Self {
        PageLayout {
            root,
            base_url,
            path: format!("/{root}.json"),
            default_per_page: DEFAULT_PER_PAGE,
            link_params: Vec::new(),
        }
    }

    /// Overrides the path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Overrides the default page size.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.default_per_page = per_page;
        self
    }

    /// Appends a parameter to every link.
    pub fn link_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.link_params.push((key.into(), value.into()));
        self
    }

    fn link(&self, page: usize, per_page: usize) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair(PAGE_PARAM, &page.to_string());
        query.append_pair(PER_PAGE_PARAM, &per_page.to_string());
        for (key, value) in &self.link_params {
            query.append_pair(key, value);
        }
        format!("{}{}?{}", self.base_url, self.path, query.finish())
    }
}

/// The page and page size a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    /// Records per page, never zero.
    pub per_page: usize,
}

impl PageRequest {
    /// Reads the page request from `params`, decoding `url` when present.
    pub fn from_params(params: &Attributes, default_per_page: usize) -> Result<Self, TransportError> {
        let (page, per_page) = match params.get_str(URL_PARAM) {
            Some(location) => {
                let url = Url::parse(location)
                    .map_err(|err| TransportError::Failure(format!("bad page url '{location}': {err}")))?;
                let mut page = None;
                let mut per_page = None;
                for (key, value) in url.query_pairs() {
                    match key.as_ref() {
                        PAGE_PARAM => page = Some(Value::String(value.into_owned())),
                        PER_PAGE_PARAM => per_page = Some(Value::String(value.into_owned())),
                        _ => {}
                    }
                }
                (page, per_page)
            }
            None => (params.get(PAGE_PARAM).cloned(), params.get(PER_PAGE_PARAM).cloned()),
        };

        Ok(PageRequest {
            page: positive(PAGE_PARAM, page)?.unwrap_or(1),
            per_page: positive(PER_PAGE_PARAM, per_page)?.unwrap_or(default_per_page.max(1)),
        })
    }
}

fn positive(name: &str, value: Option<Value>) -> Result<Option<usize>, TransportError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<usize>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(Some(n)),
        _ => Err(TransportError::Failure(format!("'{name}' must be a positive integer"))),
    }
}

/// Slices `records` into the page requested by `params`.
pub fn paginate(records: Vec<Attributes>, params: &Attributes, layout: &PageLayout<'_>) -> Result<Attributes, TransportError> {
    let PageRequest { page, per_page } = PageRequest::from_params(params, layout.default_per_page)?;

    let count = records.len();
    let pages = count.div_ceil(per_page);
    let slice: Vec<Value> = records
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(Value::from)
        .collect();

    let next = (page < pages).then(|| layout.link(page + 1, per_page));
    let previous = (page > 1).then(|| layout.link(page - 1, per_page));

    tracing::trace!(root = layout.root, page, per_page, count, "paginated");
    Ok(Attributes::new()
        .with(layout.root, slice)
        .with(COUNT_FIELD, count)
        .with(NEXT_PAGE_FIELD, next)
        .with(PREVIOUS_PAGE_FIELD, previous))
}
