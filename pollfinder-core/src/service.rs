//! Review operations over a shared poll store
//!
//! Each call is one independent sequence: filter → query → transform for
//! listing, validate → update for feedback. Nothing is held across calls.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{PollError, Result};
use crate::filter::PollQuery;
use crate::models::{id_label, FeedbackUpdate, PollResponse};
use crate::store::PollStore;
use crate::transform::transform_all;

/// Poll review operations
#[derive(Clone)]
pub struct PollService {
    store: Arc<dyn PollStore>,
}

impl PollService {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    /// List review-worthy polls matching the query, newest first.
    pub async fn list_polls(&self, query: &PollQuery) -> Result<Vec<PollResponse>> {
        let filter = query.to_filter();
        let polls = self.store.find_polls(&filter).await?;

        tracing::info!(count = polls.len(), "found polls");
        Ok(transform_all(&polls))
    }

    /// Validate and apply a reviewer verdict.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `id` or `feedback` is missing, empty, or
    ///   `feedback` is not an accepted value; the store is not touched.
    ///   `id` may be any truthy JSON value and is matched by equality.
    /// - `NotFound` when no record carries `id`.
    /// - `Store` on backend failure.
    pub async fn set_feedback(&self, id: Option<Value>, feedback: Option<&str>) -> Result<()> {
        let update = FeedbackUpdate::parse(id, feedback)?;

        tracing::info!(id = %update.id, feedback = %update.feedback, "updating feedback");

        let outcome = self
            .store
            .set_feedback(&update.id, update.feedback)
            .await?;

        if outcome.matched == 0 {
            return Err(PollError::not_found(id_label(&update.id)));
        }

        tracing::info!(id = %update.id, "feedback updated");
        Ok(())
    }

    /// Whether the backing store answers a ping
    pub async fn store_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "store ping failed");
                false
            }
        }
    }
}
