//! MongoDB-backed poll store
//!
//! Documents are read as relaxed extended JSON and decoded into
//! [`StoredPoll`], so the domain crate never sees BSON types.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::Value;

use pollfinder_core::{
    Feedback, PollFilter, PollStore, StoreError, StoredPoll, UpdateOutcome, MAX_POLLS_FOUND,
};

/// Collection written by the ingestion pipeline
pub const COLLECTION_NAME: &str = "expanded_polls";

/// Database used when none is configured
pub const DEFAULT_DATABASE: &str = "pollfinder";

/// Connection settings for the document store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string
    pub connection_string: String,
    /// Database holding the poll collection
    pub database: String,
}

impl StoreConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }
}

/// Poll store over the `expanded_polls` collection
#[derive(Clone)]
pub struct MongoPollStore {
    client: Client,
    database: String,
    polls: Collection<Document>,
}

impl MongoPollStore {
    /// Connect and verify the server answers a ping.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the server
    /// cannot be reached.
    pub async fn connect(config: &StoreConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.connection_string).await?;
        let store = Self::from_client(client, &config.database);

        store.run_ping().await?;
        tracing::info!(database = %config.database, collection = COLLECTION_NAME, "connected to MongoDB");

        Ok(store)
    }

    /// Wrap an existing client without contacting the server
    pub fn from_client(client: Client, database: &str) -> Self {
        let polls = client.database(database).collection::<Document>(COLLECTION_NAME);
        Self {
            client,
            database: database.to_owned(),
            polls,
        }
    }

    async fn run_ping(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Render a [`PollFilter`] as a MongoDB query document.
///
/// User input is regex-escaped so `date` is a literal prefix and
/// `collection` a literal, case-insensitive substring.
pub fn filter_document(filter: &PollFilter) -> Document {
    let mut query = doc! {
        "polls_mentioned": true,
        "num_polls_found": { "$lt": MAX_POLLS_FOUND },
    };

    if let Some(prefix) = &filter.added_on_prefix {
        query.insert(
            "added_on",
            doc! { "$regex": format!("^{}", regex::escape(prefix)) },
        );
    }

    if let Some(collection) = &filter.collection {
        query.insert(
            "collections",
            doc! { "$regex": regex::escape(collection), "$options": "i" },
        );
    }

    query
}

fn decode_poll(document: Document) -> Result<StoredPoll, StoreError> {
    let value = Bson::Document(document).into_relaxed_extjson();
    serde_json::from_value(value).map_err(|e| StoreError::decode(e.to_string()))
}

/// Decode a result set. A document that cannot be read is logged and
/// skipped so the rest of the list is still served.
fn decode_polls(documents: Vec<Document>) -> Vec<StoredPoll> {
    documents
        .into_iter()
        .filter_map(|document| {
            let key = document.get("_id").cloned();
            match decode_poll(document) {
                Ok(poll) => Some(poll),
                Err(e) => {
                    tracing::warn!(key = ?key, error = %e, "skipping unreadable poll record");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl PollStore for MongoPollStore {
    async fn find_polls(&self, filter: &PollFilter) -> Result<Vec<StoredPoll>, StoreError> {
        let query = filter_document(filter);
        tracing::debug!(query = %query, "querying polls");

        let cursor = self
            .polls
            .find(query)
            .sort(doc! { "added_on": -1 })
            .await
            .map_err(StoreError::backend)?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(StoreError::backend)?;

        Ok(decode_polls(documents))
    }

    async fn set_feedback(
        &self,
        id: &Value,
        feedback: Feedback,
    ) -> Result<UpdateOutcome, StoreError> {
        let id = mongodb::bson::to_bson(id).map_err(StoreError::backend)?;

        let result = self
            .polls
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "feedback": feedback.as_str() } },
            )
            .await
            .map_err(StoreError::backend)?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.run_ping().await.map_err(StoreError::backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollfinder_core::build_filter;
    use serde_json::json;

    #[test]
    fn base_filter_document() {
        let query = filter_document(&build_filter(None, None));
        assert_eq!(
            query,
            doc! {
                "polls_mentioned": true,
                "num_polls_found": { "$lt": 3_i64 },
            }
        );
    }

    #[test]
    fn date_becomes_anchored_escaped_regex() {
        let query = filter_document(&build_filter(Some("2024-01-02"), None));
        let added_on = query.get_document("added_on").unwrap();
        let pattern = added_on.get_str("$regex").unwrap();
        assert!(pattern.starts_with('^'));
        assert_eq!(&pattern[1..], regex::escape("2024-01-02"));
        assert!(regex::Regex::new(pattern).unwrap().is_match("2024-01-02T08:00:00Z"));
        assert!(query.get("collections").is_none());
    }

    #[test]
    fn collection_becomes_case_insensitive_regex() {
        let query = filter_document(&build_filter(None, Some("a.b")));
        let collections = query.get_document("collections").unwrap();
        let pattern = collections.get_str("$regex").unwrap();
        assert_eq!(pattern, r"a\.b");
        assert_eq!(collections.get_str("$options").unwrap(), "i");
        assert!(query.get("added_on").is_none());
    }

    #[test]
    fn decode_ignores_object_id_and_reads_int32_counts() {
        let document = doc! {
            "_id": mongodb::bson::oid::ObjectId::new(),
            "id": "p-1",
            "added_on": "2024-01-02T08:00:00Z",
            "polls_mentioned": true,
            "num_polls_found": 2_i32,
            "canonical_poll_data": { "pollster": "Siena", "n": 800_i32 },
            "feedback": "correct",
        };

        let poll = decode_poll(document).unwrap();
        assert_eq!(poll.id, Some(json!("p-1")));
        assert_eq!(poll.poll_count(), Some(2.0));
        assert_eq!(
            poll.canonical_poll_data,
            Some(json!({ "pollster": "Siena", "n": 800 }))
        );
        assert_eq!(poll.verdict(), Some(Feedback::Correct));
    }

    #[test]
    fn decode_reads_double_counts() {
        let poll = decode_poll(doc! { "num_polls_found": 1.0_f64 }).unwrap();
        assert_eq!(poll.poll_count(), Some(1.0));
    }

    #[test]
    fn off_type_record_does_not_drop_the_list() {
        let documents = vec![
            doc! { "id": "good", "url": "https://example.com", "polls_mentioned": true, "num_polls_found": 1 },
            doc! {
                "id": "odd",
                "url": 5,
                "added_on": mongodb::bson::DateTime::from_millis(0),
                "collections": ["x", "y"],
                "feedback": "skip",
                "polls_mentioned": true,
                "num_polls_found": 1,
            },
            doc! { "id": 42, "polls_mentioned": true, "num_polls_found": 0 },
        ];

        let polls = decode_polls(documents);
        let ids: Vec<_> = polls.iter().map(|p| p.id.clone().unwrap()).collect();
        assert_eq!(ids, vec![json!("good"), json!("odd"), json!(42)]);

        let odd = &polls[1];
        assert_eq!(odd.url, Some(json!(5)));
        assert_eq!(odd.collections, Some(json!(["x", "y"])));
        assert_eq!(odd.feedback, Some(json!("skip")));
        assert_eq!(odd.verdict(), None);
        assert_eq!(odd.added_on_str(), None);
    }

    // Integration tests require a running MongoDB
    // Run with: MONGODB_CONNECTION_STRING=mongodb://... cargo test -p pollfinder-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn feedback_round_trip() {
        let url = std::env::var("MONGODB_CONNECTION_STRING")
            .expect("MONGODB_CONNECTION_STRING required");
        let config = StoreConfig::new(url).with_database("pollfinder_test");
        let store = MongoPollStore::connect(&config).await.expect("connect failed");

        store.polls.delete_many(doc! {}).await.expect("cleanup failed");
        store
            .polls
            .insert_many([
                doc! { "id": "older", "added_on": "2024-01-01T09:00:00Z", "polls_mentioned": true, "num_polls_found": 1 },
                doc! { "id": "newer", "added_on": "2024-01-02T09:00:00Z", "polls_mentioned": true, "num_polls_found": 2 },
                doc! { "id": "busy", "added_on": "2024-01-03T09:00:00Z", "polls_mentioned": true, "num_polls_found": 3 },
            ])
            .await
            .expect("seed failed");

        let found = store.find_polls(&build_filter(None, None)).await.unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id.clone().unwrap()).collect();
        assert_eq!(ids, vec![json!("newer"), json!("older")]);

        let outcome = store.set_feedback(&json!("older"), Feedback::Correct).await.unwrap();
        assert_eq!(outcome.matched, 1);

        let outcome = store.set_feedback(&json!("missing"), Feedback::Correct).await.unwrap();
        assert_eq!(outcome.matched, 0);

        store
            .polls
            .insert_one(doc! { "id": 42_i32, "added_on": "2024-01-04T09:00:00Z", "polls_mentioned": true, "num_polls_found": 0 })
            .await
            .expect("seed failed");
        let outcome = store.set_feedback(&json!(42), Feedback::Incorrect).await.unwrap();
        assert_eq!(outcome.matched, 1);
    }
}
