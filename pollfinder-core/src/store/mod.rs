//! Document store seam
//!
//! The store handle is created once at startup and shared by every request
//! handler. Implementations must tolerate concurrent use; no operation
//! takes exclusive access and concurrent writes to the same record are
//! last-write-wins.

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::filter::PollFilter;
use crate::models::{Feedback, StoredPoll};

pub use memory::MemoryPollStore;

/// Result of an update-by-id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Records whose external id matched
    pub matched: u64,
    /// Records whose stored value actually changed
    pub modified: u64,
}

/// Read/update access to stored poll records
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Records matching `filter`, newest `added_on` first.
    ///
    /// Records without `added_on` sort last.
    async fn find_polls(&self, filter: &PollFilter) -> Result<Vec<StoredPoll>, StoreError>;

    /// Overwrite `feedback` on the first record whose external `id` equals
    /// `id`. All other fields are left untouched.
    async fn set_feedback(&self, id: &Value, feedback: Feedback)
        -> Result<UpdateOutcome, StoreError>;

    /// Round-trip to the backend to confirm it is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
