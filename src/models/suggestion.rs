use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of a user-submitted suggestion.
///
/// `Pending` is the only non-terminal state; a suggestion leaves it exactly
/// once, either to `Approved` or to `Rejected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Approved,
    Rejected,
}

/// The reviewer's verdict on a pending suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("suggestion was already {0}")]
pub struct AlreadyResolved(pub SuggestionStatus);

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SuggestionStatus::Pending)
    }

    /// Apply a review decision, yielding the next state.
    pub fn review(self, decision: ReviewDecision) -> Result<SuggestionStatus, AlreadyResolved> {
        match (self, decision) {
            (SuggestionStatus::Pending, ReviewDecision::Approve) => Ok(SuggestionStatus::Approved),
            (SuggestionStatus::Pending, ReviewDecision::Reject) => Ok(SuggestionStatus::Rejected),
            (resolved, _) => Err(AlreadyResolved(resolved)),
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SuggestionStatus::Pending),
            "approved" => Ok(SuggestionStatus::Approved),
            "rejected" => Ok(SuggestionStatus::Rejected),
            other => Err(format!("unknown suggestion status '{other}'")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    pub status: Option<SuggestionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert_eq!(
            SuggestionStatus::Pending.review(ReviewDecision::Approve),
            Ok(SuggestionStatus::Approved)
        );
        assert_eq!(
            SuggestionStatus::Pending.review(ReviewDecision::Reject),
            Ok(SuggestionStatus::Rejected)
        );
    }

    #[test]
    fn test_terminal_states_cannot_be_reviewed_again() {
        for resolved in [SuggestionStatus::Approved, SuggestionStatus::Rejected] {
            assert!(resolved.is_terminal());
            for decision in [ReviewDecision::Approve, ReviewDecision::Reject] {
                assert_eq!(resolved.review(decision), Err(AlreadyResolved(resolved)));
            }
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&SuggestionStatus::Approved).unwrap(), "\"approved\"");
        assert_eq!("rejected".parse::<SuggestionStatus>(), Ok(SuggestionStatus::Rejected));
        assert!("done".parse::<SuggestionStatus>().is_err());
    }
}
