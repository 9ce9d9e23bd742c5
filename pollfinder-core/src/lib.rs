//! pollfinder-core: poll review domain
//!
//! Turns review queries into store filters, reshapes stored poll records
//! into the API response shape, and validates reviewer feedback before it
//! is written back.

pub mod error;
pub mod filter;
pub mod models;
pub mod service;
pub mod store;
pub mod transform;

pub use error::{PollError, Result, StoreError};
pub use filter::{build_filter, PollFilter, PollQuery, MAX_POLLS_FOUND};
pub use models::{
    id_label, Confidence, ExtractedPoll, Feedback, FeedbackUpdate, MatchResults, PollMatch,
    PollResponse, StoredPoll, ValidationError,
};
pub use service::PollService;
pub use store::{MemoryPollStore, PollStore, UpdateOutcome};
pub use transform::{transform, transform_all};
