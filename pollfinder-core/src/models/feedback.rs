//! Reviewer feedback
//!
//! A record carries at most one verdict. Writes replace it outright.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::poll::is_truthy;
use super::ValidationError;

/// A reviewer's verdict on an extracted poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect,
    NotInterested,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::NotInterested => "not_interested",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Correct, Self::Incorrect, Self::NotInterested]
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is exact: no trimming, no case folding.
impl FromStr for Feedback {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "feedback",
                value: s.to_owned(),
            })
    }
}

/// A validated single-field update, addressed by external record id.
///
/// The id keeps whatever JSON type the client sent, so numeric ids listed
/// by the poll endpoint can be posted back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackUpdate {
    pub id: Value,
    pub feedback: Feedback,
}

impl FeedbackUpdate {
    /// Validate raw request fields.
    ///
    /// # Rules
    /// - `id` must be present and truthy (not `null`, `""`, `0` or `false`)
    /// - `feedback` must be present, non-empty and one of
    ///   `correct | incorrect | not_interested`
    ///
    /// Presence is checked for both fields before the value is parsed, so a
    /// request missing `id` reports the missing field even when `feedback`
    /// is also invalid.
    ///
    /// # Example
    /// ```
    /// use pollfinder_core::models::{Feedback, FeedbackUpdate};
    /// use serde_json::json;
    ///
    /// let update = FeedbackUpdate::parse(Some(json!("p-1")), Some("correct")).unwrap();
    /// assert_eq!(update.feedback, Feedback::Correct);
    /// assert!(FeedbackUpdate::parse(Some(json!(42)), Some("correct")).is_ok());
    /// assert!(FeedbackUpdate::parse(Some(json!("p-1")), Some("maybe")).is_err());
    /// assert!(FeedbackUpdate::parse(None, Some("correct")).is_err());
    /// ```
    pub fn parse(id: Option<Value>, feedback: Option<&str>) -> Result<Self, ValidationError> {
        let id = id
            .filter(is_truthy)
            .ok_or(ValidationError::Missing { field: "id" })?;
        let feedback = feedback
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::Missing { field: "feedback" })?;

        Ok(Self {
            id,
            feedback: feedback.parse()?,
        })
    }
}
