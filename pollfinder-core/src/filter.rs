//! Review query filter
//!
//! Every filter carries the two review-worthiness predicates
//! (`polls_mentioned == true` and `num_polls_found < 3`). The optional
//! `date` and `collection` parameters narrow it further and are combined
//! conjunctively.
//!
//! The filter is backend-neutral: [`PollFilter::matches`] evaluates it in
//! memory, and store backends render it into their own query language.

use serde::Deserialize;

use crate::models::StoredPoll;

/// Records with this many polls or more are never surfaced for review
pub const MAX_POLLS_FOUND: i64 = 3;

/// Query parameters accepted by the list endpoint.
///
/// Unknown parameters are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollQuery {
    /// Literal prefix of `added_on`, normally `YYYY-MM-DD`
    pub date: Option<String>,
    /// Case-insensitive substring of `collections`
    pub collection: Option<String>,
}

/// Store-level filter for review-worthy poll records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollFilter {
    /// `added_on` must start with this exact string
    pub added_on_prefix: Option<String>,
    /// `collections` must contain this string, ignoring case
    pub collection: Option<String>,
}

/// Build a filter from optional query parameters.
///
/// Empty strings count as absent. The date is not validated: any string is
/// used verbatim as a prefix, so a malformed value matches nothing.
///
/// # Example
/// ```
/// use pollfinder_core::build_filter;
///
/// let filter = build_filter(Some("2024-01-02"), None);
/// assert_eq!(filter.added_on_prefix.as_deref(), Some("2024-01-02"));
/// assert!(filter.collection.is_none());
/// ```
pub fn build_filter(date: Option<&str>, collection: Option<&str>) -> PollFilter {
    let filter = PollFilter {
        added_on_prefix: non_empty(date),
        collection: non_empty(collection),
    };

    tracing::debug!(?filter, "built poll filter");

    filter
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_owned)
}

impl PollQuery {
    /// Collect known parameters from raw query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "date" => &mut query.date,
                "collection" => &mut query.collection,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Build the store filter for this query
    pub fn to_filter(&self) -> PollFilter {
        build_filter(self.date.as_deref(), self.collection.as_deref())
    }
}

impl PollFilter {
    /// Evaluate the filter against a stored record.
    pub fn matches(&self, poll: &StoredPoll) -> bool {
        if !poll.mentions_polls() {
            return false;
        }

        match poll.poll_count() {
            Some(n) if n < MAX_POLLS_FOUND as f64 => {}
            _ => return false,
        }

        if let Some(prefix) = &self.added_on_prefix {
            match poll.added_on_str() {
                Some(added_on) if added_on.starts_with(prefix.as_str()) => {}
                _ => return false,
            }
        }

        if let Some(needle) = &self.collection {
            match poll.collections_str() {
                Some(haystack) if contains_ignore_case(haystack, needle) => {}
                _ => return false,
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
