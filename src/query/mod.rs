//! Request shaping for the list and report endpoints.
//!
//! Raw query-string parameters are turned into a typed [`ListQuery`] at the
//! HTTP boundary; everything below this module works with the typed form.

mod filter;
mod projection;
mod sort;

pub use filter::{Comparison, Condition, Filter, QueryField};
pub use projection::{Projection, PROJECTABLE_FIELDS};
pub use sort::{parse_sort, Direction, SortKey, DEFAULT_SORT};

use std::collections::HashMap;

use crate::error::Result;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_MOST_LIKED_LIMIT: u32 = 3;

/// Page size policy. `max_limit` of `None` leaves `limit` unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_limit: u32,
    pub max_limit: Option<u32>,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

impl QueryLimits {
    pub fn with_max_limit(mut self, max: Option<u32>) -> Self {
        self.max_limit = max;
        self
    }

    fn clamp(&self, limit: u32) -> u32 {
        match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Everything needed to run a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub pagination: Pagination,
}

impl ListQuery {
    pub fn from_params(params: &HashMap<String, String>, limits: &QueryLimits) -> Result<Self> {
        let page = parse_positive(params.get("page"), DEFAULT_PAGE);
        let limit = limits.clamp(parse_positive(params.get("limit"), limits.default_limit));

        Ok(Self {
            filter: Filter::from_params(params),
            sort: parse_sort(params.get("sort").map(String::as_str))?,
            projection: Projection::parse(params.get("fields").map(String::as_str))?,
            pagination: Pagination::new(page, limit),
        })
    }
}

/// Limit for the most-liked report.
pub fn most_liked_limit(params: &HashMap<String, String>) -> u32 {
    parse_positive(params.get("limit"), DEFAULT_MOST_LIKED_LIMIT)
}

/// Leading digits of `raw` as a positive integer (`5abc` is 5), or `default`
/// for anything absent, non-numeric, signed negative, zero or overflowing.
pub fn parse_positive(raw: Option<&String>, default: u32) -> u32 {
    raw.and_then(|v| {
        let v = v.trim_start();
        let v = v.strip_prefix('+').unwrap_or(v);
        let end = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
        v[..end].parse::<u32>().ok()
    })
    .filter(|n| *n > 0)
    .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = ListQuery::from_params(&HashMap::new(), &QueryLimits::default()).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.sort, vec![SortKey::desc(QueryField::LastChangedAt)]);
        assert_eq!(query.projection, Projection::All);
        assert_eq!(query.pagination, Pagination::new(1, 10));
        assert_eq!(query.pagination.skip(), 0);
    }

    #[test]
    fn test_pagination_skip() {
        let query = ListQuery::from_params(
            &params(&[("page", "3"), ("limit", "5")]),
            &QueryLimits::default(),
        )
        .unwrap();
        assert_eq!(query.pagination.skip(), 10);
    }

    #[test]
    fn test_bad_pagination_values_fall_back() {
        let query = ListQuery::from_params(
            &params(&[("page", "abc"), ("limit", "0")]),
            &QueryLimits::default(),
        )
        .unwrap();
        assert_eq!(query.pagination, Pagination::new(1, 10));

        let query = ListQuery::from_params(
            &params(&[("page", "-2"), ("limit", "")]),
            &QueryLimits::default(),
        )
        .unwrap();
        assert_eq!(query.pagination, Pagination::new(1, 10));
    }

    #[test]
    fn test_leading_digits_are_used() {
        let query = ListQuery::from_params(
            &params(&[("page", " 2nd"), ("limit", "5abc")]),
            &QueryLimits::default(),
        )
        .unwrap();
        assert_eq!(query.pagination, Pagination::new(2, 5));

        assert_eq!(parse_positive(Some(&"3.7".to_string()), 10), 3);
        assert_eq!(parse_positive(Some(&"+4".to_string()), 10), 4);
        assert_eq!(parse_positive(Some(&"abc5".to_string()), 10), 10);
        assert_eq!(parse_positive(Some(&"99999999999".to_string()), 10), 10);
    }

    #[test]
    fn test_limit_is_unbounded_by_default() {
        let query =
            ListQuery::from_params(&params(&[("limit", "100000")]), &QueryLimits::default())
                .unwrap();
        assert_eq!(query.pagination.limit, 100_000);
    }

    #[test]
    fn test_limit_is_clamped_when_capped() {
        let limits = QueryLimits::default().with_max_limit(Some(50));
        let query = ListQuery::from_params(&params(&[("limit", "500")]), &limits).unwrap();
        assert_eq!(query.pagination.limit, 50);
    }

    #[test]
    fn test_invalid_sort_fails_at_boundary() {
        let result = ListQuery::from_params(&params(&[("sort", "bogus")]), &QueryLimits::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_most_liked_limit() {
        assert_eq!(most_liked_limit(&HashMap::new()), 3);
        assert_eq!(most_liked_limit(&params(&[("limit", "2")])), 2);
        assert_eq!(most_liked_limit(&params(&[("limit", "x")])), 3);
    }
}
