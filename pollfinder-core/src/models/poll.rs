//! Poll record shapes
//!
//! `StoredPoll` mirrors a document in the `expanded_polls` collection as
//! written by the ingestion pipeline. `PollResponse` is the wire shape the
//! review front-end consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Feedback;

/// Poll record as persisted by the ingestion pipeline.
///
/// Every field is optional and carried as raw JSON, so a document with an
/// off-type field still projects. Typed views are exposed through accessor
/// methods. Unknown fields (the store's `_id` included) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredPoll {
    /// External identifier, distinct from the store's internal key
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub url: Option<Value>,
    /// ISO-8601 date-time
    #[serde(default)]
    pub added_on: Option<Value>,
    /// Human-readable tag list
    #[serde(default)]
    pub collections: Option<Value>,
    #[serde(default)]
    pub polls_mentioned: Option<Value>,
    #[serde(default)]
    pub num_polls_found: Option<Value>,

    // Flat extracted-poll fields
    #[serde(default)]
    pub pollster: Option<Value>,
    #[serde(default)]
    pub sponsor: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub sample_size: Option<Value>,
    #[serde(default)]
    pub poll_url: Option<Value>,

    #[serde(default)]
    pub canonical_poll_data: Option<Value>,
    #[serde(default)]
    pub match_poll_id: Option<Value>,
    #[serde(default)]
    pub feedback: Option<Value>,
}

impl StoredPoll {
    /// Whether the external id equals `id`.
    ///
    /// Strings compare exactly. Numbers compare by value, so `42` and
    /// `42.0` are the same id, as in the document store.
    pub fn has_id(&self, id: &Value) -> bool {
        match (self.id.as_ref(), id) {
            (Some(Value::Number(a)), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
            (Some(stored), _) => stored == id,
            (None, _) => false,
        }
    }

    /// `added_on` when it is a string
    pub fn added_on_str(&self) -> Option<&str> {
        self.added_on.as_ref().and_then(Value::as_str)
    }

    /// `collections` when it is a string
    pub fn collections_str(&self) -> Option<&str> {
        self.collections.as_ref().and_then(Value::as_str)
    }

    /// Only a stored boolean `true` counts
    pub fn mentions_polls(&self) -> bool {
        matches!(self.polls_mentioned, Some(Value::Bool(true)))
    }

    /// `num_polls_found` as a number, whatever numeric type it was stored as
    pub fn poll_count(&self) -> Option<f64> {
        self.num_polls_found.as_ref().and_then(Value::as_f64)
    }

    /// The recorded verdict, if it is one of the accepted values
    pub fn verdict(&self) -> Option<Feedback> {
        self.feedback
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }
}

/// Render an external id for messages and logs. Strings print bare.
pub fn id_label(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `null`, `false`, zero and the empty string are falsy. Objects and arrays
/// are truthy even when empty.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One extracted poll, assembled from the flat stored fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPoll {
    pub pollster: Option<Value>,
    pub sponsor: Option<Value>,
    pub date: Option<Value>,
    pub location: Option<Value>,
    pub sample_size: Option<Value>,
    pub poll_url: Option<Value>,
}

/// Confidence label attached to a canonical match.
///
/// The ingestion pipeline does not score matches, so the label is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollMatch {
    pub confidence: Confidence,
    pub matched_poll: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResults {
    pub success: bool,
    pub matches: Vec<PollMatch>,
}

/// Poll record as returned by `GET /api/polls`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollResponse {
    pub id: Option<Value>,
    pub url: Option<Value>,
    pub added_on: Option<Value>,
    pub collections: Option<Value>,
    pub polls_mentioned: Option<Value>,
    pub num_polls_found: Option<Value>,
    pub feedback: Option<Value>,
    pub polls: Vec<ExtractedPoll>,
    pub match_results: Option<MatchResults>,
    pub match_poll_id: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_document_deserializes() {
        let poll: StoredPoll = serde_json::from_value(json!({})).unwrap();
        assert_eq!(poll, StoredPoll::default());
    }

    #[test]
    fn ignores_internal_key() {
        let poll: StoredPoll = serde_json::from_value(json!({
            "_id": { "$oid": "65a1f0c2e4b0a1b2c3d4e5f6" },
            "id": "abc",
            "polls_mentioned": true
        }))
        .unwrap();
        assert_eq!(poll.id, Some(json!("abc")));
        assert!(poll.mentions_polls());
    }

    #[test]
    fn off_type_fields_are_kept_verbatim() {
        let poll: StoredPoll = serde_json::from_value(json!({
            "url": 5,
            "added_on": { "$date": "2024-01-02T00:00:00Z" },
            "collections": ["x", "y"],
            "feedback": "skip",
            "polls_mentioned": "yes"
        }))
        .unwrap();

        assert_eq!(poll.url, Some(json!(5)));
        assert_eq!(poll.collections, Some(json!(["x", "y"])));
        assert_eq!(poll.added_on_str(), None);
        assert_eq!(poll.collections_str(), None);
        assert_eq!(poll.feedback, Some(json!("skip")));
        assert_eq!(poll.verdict(), None);
        assert!(!poll.mentions_polls());
    }

    #[test]
    fn poll_count_reads_any_number() {
        let mut poll = StoredPoll {
            num_polls_found: Some(json!(2)),
            ..Default::default()
        };
        assert_eq!(poll.poll_count(), Some(2.0));

        poll.num_polls_found = Some(json!(1.5));
        assert_eq!(poll.poll_count(), Some(1.5));

        poll.num_polls_found = Some(json!("2"));
        assert_eq!(poll.poll_count(), None);
    }

    #[test]
    fn has_id_matches_by_value() {
        let mut poll = StoredPoll {
            id: Some(json!("p-9")),
            ..Default::default()
        };
        assert!(poll.has_id(&json!("p-9")));
        assert!(!poll.has_id(&json!("P-9")));

        poll.id = Some(json!(42));
        assert!(poll.has_id(&json!(42)));
        assert!(poll.has_id(&json!(42.0)));
        assert!(!poll.has_id(&json!("42")));

        poll.id = None;
        assert!(!poll.has_id(&json!("")));
    }

    #[test]
    fn id_label_prints_strings_bare() {
        assert_eq!(id_label(&json!("abc")), "abc");
        assert_eq!(id_label(&json!(42)), "42");
    }

    #[test]
    fn confidence_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Confidence::High).unwrap(), json!("high"));
    }
}
