//! Stored record → API response projection
//!
//! Pure and total: every stored record maps to exactly one response, and
//! missing optional fields only ever produce `null` or an empty list.

use crate::models::poll::is_truthy;
use crate::models::{
    Confidence, ExtractedPoll, MatchResults, PollMatch, PollResponse, StoredPoll,
};

/// Project a stored record into the response shape.
///
/// - `polls` holds exactly one entry built from the flat extracted fields
///   when `polls_mentioned` is true, and is empty otherwise. The entry is
///   emitted even if every flat field is absent.
/// - `match_results` wraps `canonical_poll_data` verbatim when it is truthy.
pub fn transform(poll: &StoredPoll) -> PollResponse {
    let polls = if poll.mentions_polls() {
        vec![ExtractedPoll {
            pollster: poll.pollster.clone(),
            sponsor: poll.sponsor.clone(),
            date: poll.date.clone(),
            location: poll.location.clone(),
            sample_size: poll.sample_size.clone(),
            poll_url: poll.poll_url.clone(),
        }]
    } else {
        Vec::new()
    };

    let match_results = poll
        .canonical_poll_data
        .as_ref()
        .filter(|data| is_truthy(data))
        .map(|data| MatchResults {
            success: true,
            matches: vec![PollMatch {
                confidence: Confidence::High,
                matched_poll: data.clone(),
            }],
        });

    PollResponse {
        id: poll.id.clone(),
        url: poll.url.clone(),
        added_on: poll.added_on.clone(),
        collections: poll.collections.clone(),
        polls_mentioned: poll.polls_mentioned.clone(),
        num_polls_found: poll.num_polls_found.clone(),
        feedback: poll.feedback.clone(),
        polls,
        match_results,
        match_poll_id: poll.match_poll_id.clone(),
    }
}

/// Project a sequence of records, preserving input order.
pub fn transform_all(polls: &[StoredPoll]) -> Vec<PollResponse> {
    polls.iter().map(transform).collect()
}
