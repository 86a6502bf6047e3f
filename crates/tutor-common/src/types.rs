use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How deep the tutor should go when explaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningLevel {
    #[default]
    #[serde(alias = "Beginner")]
    Beginner,
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
}

impl LearningLevel {
    pub const ALL: [LearningLevel; 3] = [
        LearningLevel::Beginner,
        LearningLevel::Intermediate,
        LearningLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningLevel::Beginner => "Beginner",
            LearningLevel::Intermediate => "Intermediate",
            LearningLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for LearningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(LearningLevel::Beginner),
            "intermediate" => Ok(LearningLevel::Intermediate),
            "advanced" => Ok(LearningLevel::Advanced),
            other => Err(format!("unknown learning level: {other:?}")),
        }
    }
}
