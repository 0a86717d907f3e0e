//! List filtering and pagination helpers.
//!
//! Lives in `core` so repositories and API handlers agree on how page
//! numbers, date ranges and substring filters translate into SQL bounds.

use chrono::{Days, NaiveDate, TimeZone, Utc};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A resolved `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Translate a 1-based page number and page size into limit/offset.
    pub fn from_params(page: Option<i64>, size: Option<i64>) -> Self {
        let limit = clamp_limit(size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let page = page.unwrap_or(1).max(1);
        Self {
            limit,
            offset: clamp_offset(Some((page - 1).saturating_mul(limit))),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::from_params(None, None)
    }
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// Inclusive calendar-date range, as sent by `?created_after=&created_before=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self { after, before }
    }

    /// Half-open UTC timestamp bounds `[start, end)` covering both end dates.
    pub fn bounds(&self) -> (Option<Timestamp>, Option<Timestamp>) {
        let start = self.after.map(start_of_day);
        let end = self
            .before
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .map(start_of_day);
        (start, end)
    }
}

fn start_of_day(date: NaiveDate) -> Timestamp {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

// ---------------------------------------------------------------------------
// Substring matching
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern matching `needle` anywhere, escaping wildcards.
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Optional variant of [`contains_pattern`] that ignores blank input.
pub fn optional_contains(needle: Option<&str>) -> Option<String> {
    needle
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(contains_pattern)
}
