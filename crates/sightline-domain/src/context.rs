//! Evaluation context

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inputs that fix the frame of one evaluation run
///
/// The evaluation date is supplied by the caller rather than read from the
/// clock, so the same snapshot evaluated twice gives the same result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationContext {
    /// Subject under evaluation
    pub subject: String,
    /// Date TTLs are measured against
    pub as_of: NaiveDate,
}

impl EvaluationContext {
    /// Create a new context
    pub fn new(subject: impl Into<String>, as_of: NaiveDate) -> Self {
        Self {
            subject: subject.into(),
            as_of,
        }
    }
}
