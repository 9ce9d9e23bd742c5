//! In-memory poll store
//!
//! Evaluates [`PollFilter`] directly against held records. Used by tests
//! and local runs without a document store.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{PollStore, UpdateOutcome};
use crate::error::StoreError;
use crate::filter::PollFilter;
use crate::models::{Feedback, StoredPoll};

#[derive(Debug, Default)]
pub struct MemoryPollStore {
    polls: RwLock<Vec<StoredPoll>>,
    offline: AtomicBool,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with records, kept in insertion order
    pub fn with_polls(polls: Vec<StoredPoll>) -> Self {
        Self {
            polls: RwLock::new(polls),
            offline: AtomicBool::new(false),
        }
    }

    pub async fn insert(&self, poll: StoredPoll) {
        self.polls.write().await.push(poll);
    }

    /// First record carrying the given external id
    pub async fn get(&self, id: &Value) -> Option<StoredPoll> {
        self.polls
            .read()
            .await
            .iter()
            .find(|p| p.has_id(id))
            .cloned()
    }

    /// Snapshot of every held record
    pub async fn all(&self) -> Vec<StoredPoll> {
        self.polls.read().await.clone()
    }

    /// Make every subsequent operation fail as if the backend were down
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::backend("store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn find_polls(&self, filter: &PollFilter) -> Result<Vec<StoredPoll>, StoreError> {
        self.check_online()?;

        let mut found: Vec<StoredPoll> = self
            .polls
            .read()
            .await
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        // Stable, so equal timestamps keep insertion order. `None` sorts
        // below every `Some`, which puts undated records last.
        found.sort_by(|a, b| b.added_on_str().cmp(&a.added_on_str()));
        Ok(found)
    }

    async fn set_feedback(
        &self,
        id: &Value,
        feedback: Feedback,
    ) -> Result<UpdateOutcome, StoreError> {
        self.check_online()?;

        let mut polls = self.polls.write().await;
        let Some(poll) = polls.iter_mut().find(|p| p.has_id(id)) else {
            return Ok(UpdateOutcome::default());
        };

        let value = Value::from(feedback.as_str());
        let modified = poll.feedback.as_ref() != Some(&value);
        poll.feedback = Some(value);

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
