use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SuggestionStatus;

/// Category used when a promoted suggestion did not name one.
pub const DEFAULT_EXERCISE_CATEGORY: &str = "general";

/// A drill in the canonical exercise library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub main_category: String,
    pub sub_category: Option<String>,
    pub level: Option<String>,
    pub goal: Option<String>,
    pub description: Option<String>,
    pub players_required: Option<i32>,
    pub intensity: Option<String>,
    pub duration_min: Option<i32>,
    pub duration_max: Option<i32>,
    pub tags: Vec<String>,
    pub age_groups: Vec<String>,
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub created_by: Option<i64>,
    pub approved_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateExercise {
    pub name: String,
    pub main_category: String,
    pub sub_category: Option<String>,
    pub level: Option<String>,
    pub goal: Option<String>,
    pub description: Option<String>,
    pub players_required: Option<i32>,
    pub intensity: Option<String>,
    pub duration_min: Option<i32>,
    pub duration_max: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub age_groups: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub video_urls: Vec<String>,
}

/// Insert payload for the exercises table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub fields: CreateExercise,
    pub created_by: Option<i64>,
    pub approved_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseFilter {
    pub category: Option<String>,
    pub intensity: Option<String>,
    pub age: Option<String>,
}

impl ExerciseFilter {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        self.category.as_ref().map_or(true, |c| &exercise.main_category == c)
            && self
                .intensity
                .as_ref()
                .map_or(true, |i| exercise.intensity.as_ref() == Some(i))
            && self.age.as_ref().map_or(true, |a| exercise.age_groups.contains(a))
    }
}

/// A coach's proposal for a new exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSuggestion {
    pub id: i64,
    pub name: String,
    pub main_category: Option<String>,
    pub description: Option<String>,
    pub submitted_by: i64,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmitExerciseSuggestion {
    pub name: String,
    pub main_category: Option<String>,
    pub description: Option<String>,
}

impl ExerciseSuggestion {
    /// Canonical exercise produced when this suggestion is approved.
    pub fn promote(&self, reviewer_id: i64) -> NewExercise {
        NewExercise {
            fields: CreateExercise {
                name: self.name.clone(),
                main_category: self
                    .main_category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EXERCISE_CATEGORY.to_string()),
                description: self.description.clone(),
                ..CreateExercise::default()
            },
            created_by: Some(self.submitted_by),
            approved_by: Some(reviewer_id),
        }
    }
}
