//! Tutor persona configuration.

use serde::{Deserialize, Serialize};
use tutor_common::LearningLevel;

/// Subject domain the tutor is restricted to and the page heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorSettings {
    pub subject: String,
    pub title: String,
    /// Level preselected for new browser sessions.
    pub default_level: LearningLevel,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            subject: "Data Science".into(),
            title: "Ask AI: Your Data Science Helper".into(),
            default_level: LearningLevel::Beginner,
        }
    }
}
