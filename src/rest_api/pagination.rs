//! # Pagination
//!
//! Page-number pagination with absolute next/previous links.
//!
//! - `page` is 1-based, or the literal `last`
//! - `page_size` overrides the default, clamped to the maximum
//! - An empty set still has one (empty) page

use super::errors::{RestError, RestResult};
use super::response::PageResponse;

/// Page size when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: usize = 1000;

const PAGE_PARAM: &str = "page";
const LAST_PAGE: &str = "last";

/// Raw paging parameters as received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Slices ordered results into pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    default_size: usize,
    max_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(default_size: usize, max_size: usize) -> Self {
        Self {
            default_size,
            max_size,
        }
    }

    /// Effective page size. Anything unparsable or non-positive falls back
    /// to the default.
    pub fn page_size(&self, requested: Option<&str>) -> usize {
        match requested.and_then(|raw| raw.trim().parse::<usize>().ok()) {
            Some(size) if size > 0 => size.min(self.max_size),
            _ => self.default_size,
        }
    }

    /// Cut one page out of `items`
    pub fn paginate<T: serde::Serialize>(
        &self,
        items: Vec<T>,
        request: &PageRequest,
        links: &LinkBuilder,
    ) -> RestResult<PageResponse<T>> {
        let total = items.len();
        let size = self.page_size(request.page_size.as_deref());
        let num_pages = total.div_ceil(size).max(1);

        let page = match request.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(LAST_PAGE) => num_pages,
            Some(raw) => raw.parse::<usize>().map_err(|_| RestError::InvalidPage)?,
        };
        if page == 0 || page > num_pages {
            return Err(RestError::InvalidPage);
        }

        let results = items.into_iter().skip((page - 1) * size).take(size).collect();
        let next = (page < num_pages).then(|| links.page_url(page + 1));
        let previous = (page > 1).then(|| links.page_url(page - 1));

        Ok(PageResponse {
            total,
            next,
            previous,
            results,
        })
    }
}

/// Builds absolute links to other pages of the same listing
///
/// Every query parameter except `page` is carried over verbatim; pairs are
/// emitted sorted so links are stable regardless of request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base: String,
    pairs: Vec<(String, String)>,
}

impl LinkBuilder {
    /// `host` and `path` as seen by the server; `query` still percent-encoded
    pub fn new(host: &str, path: &str, query: Option<&str>) -> Self {
        let pairs = query
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .filter(|(key, _)| key != PAGE_PARAM)
            .collect();

        Self {
            base: format!("http://{}{}", host, path),
            pairs,
        }
    }

    /// Link to `page`. Page 1 carries no `page` parameter.
    pub fn page_url(&self, page: usize) -> String {
        let mut pairs = self.pairs.clone();
        if page != 1 {
            pairs.push((PAGE_PARAM.to_string(), page.to_string()));
        }
        pairs.sort();

        if pairs.is_empty() {
            return self.base.clone();
        }

        let query: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        format!("{}?{}", self.base, query.join("&"))
    }
}
