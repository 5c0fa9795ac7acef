//! Offset/limit paging parameters

use std::collections::HashMap;

pub const DEFAULT_LIMIT: usize = 12;
pub const DEFAULT_SKIP: usize = 0;

/// A page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub skip: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: DEFAULT_SKIP,
        }
    }
}

/// Coerce a raw value to a count
///
/// Numeric text is truncated toward zero. Missing, non-numeric, negative
/// or zero input yields `None` so the caller falls back to its default.
fn coerce(raw: Option<&str>) -> Option<usize> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() || value < 1.0 {
        return None;
    }
    Some(value.trunc() as usize)
}

impl Page {
    pub fn new(limit: usize, skip: usize) -> Self {
        Self { limit, skip }
    }

    /// Build from raw `limit` / `skip` values
    pub fn from_raw(limit: Option<&str>, skip: Option<&str>) -> Self {
        Self {
            limit: coerce(limit).unwrap_or(DEFAULT_LIMIT),
            skip: coerce(skip).unwrap_or(DEFAULT_SKIP),
        }
    }

    /// Build from a URL query string (without the leading `?`)
    ///
    /// An unparseable query string yields the default page.
    pub fn from_query(query: Option<&str>) -> Self {
        let params: HashMap<String, String> = query
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default();

        Self::from_raw(
            params.get("limit").map(String::as_str),
            params.get("skip").map(String::as_str),
        )
    }

    /// Slice `[skip, skip + limit)` clamped to `data`
    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        let start = self.skip.min(data.len());
        let end = start.saturating_add(self.limit).min(data.len());
        &data[start..end]
    }
}
