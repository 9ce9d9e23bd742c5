//! Domain models
//!
//! Stored records are read leniently so a sparse document never fails the
//! projection. Request input is validated at construction and returns
//! `ValidationError`, never panics.

pub mod feedback;
pub mod poll;
pub mod validation;

pub use feedback::{Feedback, FeedbackUpdate};
pub use poll::{
    id_label, Confidence, ExtractedPoll, MatchResults, PollMatch, PollResponse, StoredPoll,
};
pub use validation::ValidationError;
