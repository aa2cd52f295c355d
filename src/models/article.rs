use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SuggestionStatus;

pub const PUBLISHED: &str = "published";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_by: i64,
    pub approved_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
}

/// Insert payload for the articles table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub created_by: i64,
    pub approved_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleSuggestion {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub submitted_by: i64,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ArticleSuggestion {
    /// Canonical article produced when this suggestion is approved.
    pub fn promote(&self, reviewer_id: i64) -> NewArticle {
        NewArticle {
            title: self.title.clone(),
            content: self.content.clone(),
            created_by: self.submitted_by,
            approved_by: Some(reviewer_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_copies_submission() {
        let suggestion = ArticleSuggestion {
            id: 1,
            title: "Serve receive basics".to_string(),
            content: "Platform angle first.".to_string(),
            submitted_by: 4,
            status: SuggestionStatus::Pending,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        };

        let promoted = suggestion.promote(9);
        assert_eq!(promoted.title, suggestion.title);
        assert_eq!(promoted.content, suggestion.content);
        assert_eq!(promoted.created_by, 4);
        assert_eq!(promoted.approved_by, Some(9));
    }
}
